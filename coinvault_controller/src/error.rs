//! Controller error type.

use crate::ledger::LedgerError;
use coinvault_common::hal::driver::ActuatorFault;
use thiserror::Error;

/// Fault that stops the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// A motor or lock action failed.
    #[error("Actuator fault: {0}")]
    Actuator(#[from] ActuatorFault),

    /// The ledger could not be read or written.
    #[error("Persistence fault: {0}")]
    Persistence(#[from] LedgerError),

    /// Input arrived after an earlier fault.
    #[error("Controller is halted")]
    Halted,
}
