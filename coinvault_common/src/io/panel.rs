//! Front panel buttons.

use std::fmt;
use std::str::FromStr;

/// One of the five front panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Select.
    Select,
    /// Left.
    Left,
    /// Right.
    Right,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Button {
    /// All buttons.
    pub const ALL: [Button; 5] = [
        Button::Select,
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
    ];

    /// Lowercase name, as typed on the console front end.
    pub const fn name(self) -> &'static str {
        match self {
            Button::Select => "select",
            Button::Left => "left",
            Button::Right => "right",
            Button::Up => "up",
            Button::Down => "down",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = ();

    /// Case-insensitive button name with an optional leading `!`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('!').unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Source of button presses.
pub trait FrontPanel {
    /// Return the next pending press, if any. Never blocks.
    fn poll_button(&mut self) -> Option<Button>;
}
