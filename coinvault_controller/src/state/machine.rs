//! Mode transitions.
//!
//! Idle → Accepting ↔ Idle, Idle → Authenticating → Unlocked → Idle, and any
//! mode → Halted on a fault.

use super::OperatingMode;

/// Result of a mode transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition succeeded: new mode.
    Ok(OperatingMode),
    /// Transition rejected: reason.
    Rejected(&'static str),
}

/// Event that can move the vault between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankEvent {
    /// Select pressed on the main screen.
    StartAccept,
    /// A coin was routed and counted.
    CoinAccepted,
    /// Right pressed while accepting or authenticating.
    Cancel,
    /// Left pressed on the main screen.
    StartAuth,
    /// The fingerprint reader reported success.
    AuthSucceeded,
    /// Carousel advanced one bin while unlocked.
    RotateNext,
    /// Aligned bin count changed while unlocked.
    AdjustCount,
    /// Door locked again.
    Lock,
    /// Actuator or persistence fault.
    Fault,
}

/// Holder of the current mode.
#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    mode: OperatingMode,
}

impl ModeMachine {
    /// Machine in `Idle`.
    pub const fn new() -> Self {
        Self {
            mode: OperatingMode::Idle,
        }
    }

    /// Current mode.
    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// True once a fault has been recorded.
    #[inline]
    pub const fn is_halted(&self) -> bool {
        matches!(self.mode, OperatingMode::Halted)
    }

    /// Attempt a transition.
    pub fn handle_event(&mut self, event: BankEvent) -> TransitionResult {
        use BankEvent::*;
        use OperatingMode::*;

        let next = match (self.mode, event) {
            (Halted, _) => {
                return TransitionResult::Rejected(invalid_transition_reason(self.mode, event));
            }

            (_, Fault) => Halted,

            (Idle, StartAccept) => Accepting,
            (Accepting, CoinAccepted) => Accepting,
            (Accepting, Cancel) => Idle,

            (Idle, StartAuth) => Authenticating,
            (Authenticating, AuthSucceeded) => Unlocked,
            (Authenticating, Cancel) => Idle,

            (Unlocked, RotateNext) => Unlocked,
            (Unlocked, AdjustCount) => Unlocked,
            (Unlocked, Lock) => Idle,

            _ => {
                return TransitionResult::Rejected(invalid_transition_reason(self.mode, event));
            }
        };

        self.mode = next;
        TransitionResult::Ok(next)
    }
}

fn invalid_transition_reason(mode: OperatingMode, event: BankEvent) -> &'static str {
    use OperatingMode::*;
    match (mode, event) {
        (Halted, _) => "Halted: no further events are processed",
        (Idle, _) => "Idle: only StartAccept, StartAuth or Fault allowed",
        (Accepting, _) => "Accepting: only CoinAccepted, Cancel or Fault allowed",
        (Authenticating, _) => "Authenticating: only AuthSucceeded, Cancel or Fault allowed",
        (Unlocked, _) => "Unlocked: invalid event for current mode",
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
