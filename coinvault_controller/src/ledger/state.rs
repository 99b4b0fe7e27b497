//! Ledger state and record format.
//!
//! The record is six lines: total, position tag, then the Quarter, Dime,
//! Nickel and Penny counts.
//!
//! ```text
//! 0.21
//! PENNY
//! 0
//! 2
//! 0
//! 1
//! ```
//!
//! The total is always recomputed from the counts with exact decimal
//! arithmetic; the stored total is only checked against it.

use coinvault_common::coin::{Denomination, RING_SIZE};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Reason a ledger record could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLedger {
    /// A line is missing.
    #[error("missing {0} line")]
    MissingField(&'static str),

    /// The total is not a non-negative decimal.
    #[error("invalid total {0:?}")]
    InvalidTotal(String),

    /// The position is not a known tag.
    #[error("unknown position {0:?}")]
    UnknownPosition(String),

    /// A count is not a non-negative integer.
    #[error("invalid {denomination} count {value:?}")]
    InvalidCount {
        /// Bin whose count failed to parse.
        denomination: Denomination,
        /// Raw text.
        value: String,
    },

    /// Non-blank content after the last count.
    #[error("unexpected trailing data")]
    TrailingData,
}

/// A decoded record together with the total as it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Ledger with the recomputed total.
    pub state: LedgerState,
    /// Total found in the record.
    pub stored_total: Decimal,
}

impl Decoded {
    /// True when the stored total equals the recomputed one.
    pub fn is_consistent(&self) -> bool {
        self.stored_total == self.state.total()
    }
}

/// Coin counts, carousel position and the exact total they imply.
///
/// The total is private and recomputed after every mutation, so
/// `total == Σ counts[d] * value(d)` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    total: Decimal,
    counts: [u32; RING_SIZE],
    position: Denomination,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::zero()
    }
}

impl LedgerState {
    /// Empty vault aligned with the first bin.
    pub fn zero() -> Self {
        Self::from_parts([0; RING_SIZE], Denomination::default())
    }

    /// Build a ledger from counts (ring order) and position.
    pub fn from_parts(counts: [u32; RING_SIZE], position: Denomination) -> Self {
        Self {
            total: total_of(&counts),
            counts,
            position,
        }
    }

    /// Total value held.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Count for one denomination.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts[denomination.index()]
    }

    /// All counts in ring order.
    pub fn counts(&self) -> [u32; RING_SIZE] {
        self.counts
    }

    /// Total number of coins.
    pub fn coin_count(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Bin currently under the feed.
    pub fn position(&self) -> Denomination {
        self.position
    }

    /// Record the carousel as aligned with `denomination`.
    pub fn set_position(&mut self, denomination: Denomination) {
        self.position = denomination;
    }

    /// Count one more coin of `denomination`.
    pub fn record_coin(&mut self, denomination: Denomination) {
        let slot = &mut self.counts[denomination.index()];
        *slot = slot.saturating_add(1);
        self.recompute();
    }

    /// Remove one coin of `denomination`; stays at zero when already empty.
    pub fn remove_coin(&mut self, denomination: Denomination) {
        let slot = &mut self.counts[denomination.index()];
        *slot = slot.saturating_sub(1);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total = total_of(&self.counts);
    }

    /// Encode as the six-line record, without a trailing newline.
    pub fn encode(&self) -> String {
        let mut lines = Vec::with_capacity(2 + RING_SIZE);
        lines.push(self.total.to_string());
        lines.push(self.position.tag().to_string());
        lines.extend(self.counts.iter().map(u32::to_string));
        lines.join("\n")
    }

    /// Decode a six-line record.
    ///
    /// Lines are trimmed, so CRLF endings and a trailing newline are accepted.
    pub fn decode(text: &str) -> Result<Decoded, MalformedLedger> {
        let mut lines = text.lines().map(str::trim);

        let total_text = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or(MalformedLedger::MissingField("total"))?;
        let stored_total = Decimal::from_str(total_text)
            .ok()
            .filter(|t| !t.is_sign_negative())
            .ok_or_else(|| MalformedLedger::InvalidTotal(total_text.to_string()))?;

        let position_text = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or(MalformedLedger::MissingField("position"))?;
        let position = Denomination::from_str(position_text)
            .map_err(|_| MalformedLedger::UnknownPosition(position_text.to_string()))?;

        let mut counts = [0u32; RING_SIZE];
        for denomination in Denomination::ALL {
            let value = lines
                .next()
                .ok_or(MalformedLedger::MissingField("count"))?;
            counts[denomination.index()] =
                value
                    .parse::<u32>()
                    .map_err(|_| MalformedLedger::InvalidCount {
                        denomination,
                        value: value.to_string(),
                    })?;
        }

        if lines.any(|l| !l.is_empty()) {
            return Err(MalformedLedger::TrailingData);
        }

        Ok(Decoded {
            state: Self::from_parts(counts, position),
            stored_total,
        })
    }
}

fn total_of(counts: &[u32; RING_SIZE]) -> Decimal {
    Denomination::ALL
        .iter()
        .fold(Decimal::new(0, 2), |acc, d| {
            acc + d.value() * Decimal::from(counts[d.index()])
        })
}
