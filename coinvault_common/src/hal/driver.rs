//! Actuator driver trait and fault type.
//!
//! This module defines:
//! - `ActuatorDriver` trait - Interface for pluggable actuator backends
//! - `ActuatorFault` enum - Failure of an actuator action or link
//! - `DriverFactory` type alias - Factory function type

use crate::hal::config::ActuatorConfig;
use crate::hal::types::{ActuatorAction, Direction};
use thiserror::Error;

/// Failure reported by the actuator facade.
///
/// Every variant is fatal for the operation in progress; the controller
/// persists what it has and halts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorFault {
    /// The link to the actuator brick cannot be established.
    #[error("Actuator link unavailable: {0}")]
    LinkUnavailable(String),

    /// An action did not acknowledge within the ack timeout.
    #[error("Actuator {action} not acknowledged within {timeout_ms}ms")]
    NotAcknowledged {
        /// Action that stalled.
        action: ActuatorAction,
        /// Ack timeout in force.
        timeout_ms: u64,
    },

    /// Driver initialization failed.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Driver not found in the registry.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn ActuatorDriver>;

/// Interface for the carousel, feed and lock motors.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the control loop starts
/// 2. `rotate()` / `feed_one_coin()` / `set_lock()` / `release_rotation()` -
///    blocking actions from the control loop
/// 3. `shutdown()` - Called when the controller is stopping
///
/// All actions are open-loop: they return once the motion nominally completed
/// (fixed dwell) or fail with an [`ActuatorFault`]. There is no cancellation
/// of an action in flight.
pub trait ActuatorDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Initialize the driver and establish the actuator link.
    ///
    /// # Errors
    /// `ActuatorFault::InitFailed` or `ActuatorFault::LinkUnavailable` if the
    /// brick cannot be reached.
    fn init(&mut self, config: &ActuatorConfig) -> Result<(), ActuatorFault>;

    /// Turn the carousel `steps` bins in `direction`. `steps == 0` is a no-op.
    fn rotate(&mut self, direction: Direction, steps: u8) -> Result<(), ActuatorFault>;

    /// Run the feed forward then back through one cycle, dropping one coin
    /// into the aligned bin.
    fn feed_one_coin(&mut self) -> Result<(), ActuatorFault>;

    /// Drive the lock to the engaged (`true`) or released (`false`) extreme.
    fn set_lock(&mut self, engaged: bool) -> Result<(), ActuatorFault>;

    /// Let the carousel motor free-spin so it can be turned by hand.
    fn release_rotation(&mut self) -> Result<(), ActuatorFault>;

    /// Graceful shutdown. Should complete within 1 second.
    fn shutdown(&mut self) -> Result<(), ActuatorFault>;
}

impl<T: ActuatorDriver + ?Sized> ActuatorDriver for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn version(&self) -> &'static str {
        (**self).version()
    }

    fn init(&mut self, config: &ActuatorConfig) -> Result<(), ActuatorFault> {
        (**self).init(config)
    }

    fn rotate(&mut self, direction: Direction, steps: u8) -> Result<(), ActuatorFault> {
        (**self).rotate(direction, steps)
    }

    fn feed_one_coin(&mut self) -> Result<(), ActuatorFault> {
        (**self).feed_one_coin()
    }

    fn set_lock(&mut self, engaged: bool) -> Result<(), ActuatorFault> {
        (**self).set_lock(engaged)
    }

    fn release_rotation(&mut self) -> Result<(), ActuatorFault> {
        (**self).release_rotation()
    }

    fn shutdown(&mut self) -> Result<(), ActuatorFault> {
        (**self).shutdown()
    }
}
