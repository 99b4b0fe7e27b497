//! Operating mode and its transition table.

pub mod machine;

use std::fmt;

/// Operator-facing mode of the vault.
///
/// Exactly one mode is active. `Halted` is terminal: it is entered after an
/// actuator or persistence fault and no further input is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperatingMode {
    /// Main screen, door locked.
    #[default]
    Idle,
    /// Routing coins reported by the sensor module.
    Accepting,
    /// Waiting for the fingerprint reader.
    Authenticating,
    /// Door open, carousel free for manual adjustment.
    Unlocked,
    /// Stopped after a fault.
    Halted,
}

impl OperatingMode {
    /// True when serial lines carry meaning in this mode.
    #[inline]
    pub const fn listens_to_serial(self) -> bool {
        matches!(self, OperatingMode::Accepting | OperatingMode::Authenticating)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatingMode::Idle => "Idle",
            OperatingMode::Accepting => "Accepting",
            OperatingMode::Authenticating => "Authenticating",
            OperatingMode::Unlocked => "Unlocked",
            OperatingMode::Halted => "Halted",
        };
        f.write_str(name)
    }
}
