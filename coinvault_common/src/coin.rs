//! Coin denominations and the carousel ring.
//!
//! The carousel holds four bins, one per denomination, arranged in the fixed
//! cycle Quarter → Dime → Nickel → Penny → Quarter. The ring index of a
//! denomination is its bin's angular slot (index × 90°).

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Number of bins on the carousel.
pub const RING_SIZE: usize = 4;

/// One of the four fixed coin classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Denomination {
    /// 25 cents, ring slot 0.
    #[default]
    Quarter,
    /// 10 cents, ring slot 1.
    Dime,
    /// 5 cents, ring slot 2.
    Nickel,
    /// 1 cent, ring slot 3.
    Penny,
}

impl Denomination {
    /// All denominations in ring order.
    pub const ALL: [Denomination; RING_SIZE] = [
        Denomination::Quarter,
        Denomination::Dime,
        Denomination::Nickel,
        Denomination::Penny,
    ];

    /// Position on the carousel ring (0..4).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Denomination::Quarter => 0,
            Denomination::Dime => 1,
            Denomination::Nickel => 2,
            Denomination::Penny => 3,
        }
    }

    /// Denomination at a ring index, wrapping modulo the ring size.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % RING_SIZE]
    }

    /// Next bin clockwise.
    #[inline]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous bin (one step counter-clockwise).
    #[inline]
    pub const fn prev(self) -> Self {
        Self::from_index(self.index() + RING_SIZE - 1)
    }

    /// Face value in dollars, scale 2.
    pub fn value(self) -> Decimal {
        match self {
            Denomination::Quarter => Decimal::new(25, 2),
            Denomination::Dime => Decimal::new(10, 2),
            Denomination::Nickel => Decimal::new(5, 2),
            Denomination::Penny => Decimal::new(1, 2),
        }
    }

    /// Tag used on the serial wire and in the ledger file.
    pub const fn tag(self) -> &'static str {
        match self {
            Denomination::Quarter => "QUARTER",
            Denomination::Dime => "DIME",
            Denomination::Nickel => "NICKEL",
            Denomination::Penny => "PENNY",
        }
    }

    /// Plural display name.
    pub const fn plural(self) -> &'static str {
        match self {
            Denomination::Quarter => "QUARTERS",
            Denomination::Dime => "DIMES",
            Denomination::Nickel => "NICKELS",
            Denomination::Penny => "PENNIES",
        }
    }

    /// One-letter label for the totals screen.
    pub const fn short(self) -> char {
        match self {
            Denomination::Quarter => 'Q',
            Denomination::Dime => 'D',
            Denomination::Nickel => 'N',
            Denomination::Penny => 'P',
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string is not an exact denomination tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown denomination tag: {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for Denomination {
    type Err = UnknownTag;

    /// Exact tag match. Substring matching of noisy serial tokens lives in
    /// the controller's classifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.tag() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}
