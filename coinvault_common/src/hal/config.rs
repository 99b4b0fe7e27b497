//! Actuator configuration.
//!
//! Loaded from the `[actuators]` table of the vault configuration. Every field
//! has a default so an empty table yields the stock mechanics.

use crate::hal::consts::*;
use crate::hal::driver::ActuatorFault;
use crate::hal::types::ActuatorAction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Motor constants and driver selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuatorConfig {
    /// Registered driver name.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Rotate motor power (1..=100).
    #[serde(default = "default_rotate_power")]
    pub rotate_power: u8,

    /// Feed motor power (1..=100).
    #[serde(default = "default_feed_power")]
    pub feed_power: u8,

    /// Lock motor power (1..=100).
    #[serde(default = "default_lock_power")]
    pub lock_power: u8,

    /// Carousel step angle in degrees.
    #[serde(default = "default_step_angle")]
    pub step_angle_deg: u32,

    /// Lock bolt travel in degrees.
    #[serde(default = "default_lock_distance")]
    pub lock_distance_deg: u32,

    /// Feed kick in degrees.
    #[serde(default = "default_feed_distance")]
    pub feed_distance_deg: u32,

    /// Dwell after a carousel move (ms).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Pause between feed strokes (ms).
    #[serde(default = "default_feed_pause_ms")]
    pub feed_pause_ms: u64,

    /// Ack timeout for a single action (ms).
    #[serde(default = "default_ack_timeout_ms")]
    pub ack_timeout_ms: u64,

    /// Simulation driver settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_driver() -> String {
    DEFAULT_DRIVER.to_string()
}
fn default_rotate_power() -> u8 {
    ROTATE_POWER
}
fn default_feed_power() -> u8 {
    FEED_POWER
}
fn default_lock_power() -> u8 {
    LOCK_POWER
}
fn default_step_angle() -> u32 {
    STEP_ANGLE_DEG
}
fn default_lock_distance() -> u32 {
    LOCK_DISTANCE_DEG
}
fn default_feed_distance() -> u32 {
    FEED_DISTANCE_DEG
}
fn default_settle_ms() -> u64 {
    SETTLE_MS
}
fn default_feed_pause_ms() -> u64 {
    FEED_PAUSE_MS
}
fn default_ack_timeout_ms() -> u64 {
    ACK_TIMEOUT_MS
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            rotate_power: ROTATE_POWER,
            feed_power: FEED_POWER,
            lock_power: LOCK_POWER,
            step_angle_deg: STEP_ANGLE_DEG,
            lock_distance_deg: LOCK_DISTANCE_DEG,
            feed_distance_deg: FEED_DISTANCE_DEG,
            settle_ms: SETTLE_MS,
            feed_pause_ms: FEED_PAUSE_MS,
            ack_timeout_ms: ACK_TIMEOUT_MS,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ActuatorConfig {
    /// Config with all dwell times zeroed. Used by tests and dry runs.
    pub fn instant() -> Self {
        Self {
            settle_ms: 0,
            feed_pause_ms: 0,
            ..Self::default()
        }
    }

    /// Settle dwell as a `Duration`.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Feed pause as a `Duration`.
    pub fn feed_pause(&self) -> Duration {
        Duration::from_millis(self.feed_pause_ms)
    }

    /// Validate the motor constants.
    ///
    /// # Errors
    /// Returns `ActuatorFault::ConfigError` if:
    /// - `driver` is empty
    /// - any power is outside 1..=100
    /// - the step angle, lock distance or feed distance is zero
    /// - `ack_timeout_ms` is zero
    pub fn validate(&self) -> Result<(), ActuatorFault> {
        if self.driver.is_empty() {
            return Err(ActuatorFault::ConfigError(
                "driver cannot be empty".to_string(),
            ));
        }

        for (name, power) in [
            ("rotate_power", self.rotate_power),
            ("feed_power", self.feed_power),
            ("lock_power", self.lock_power),
        ] {
            if !(1..=100).contains(&power) {
                return Err(ActuatorFault::ConfigError(format!(
                    "{name} must be in 1..=100, got {power}"
                )));
            }
        }

        for (name, value) in [
            ("step_angle_deg", self.step_angle_deg),
            ("lock_distance_deg", self.lock_distance_deg),
            ("feed_distance_deg", self.feed_distance_deg),
        ] {
            if value == 0 {
                return Err(ActuatorFault::ConfigError(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if self.ack_timeout_ms == 0 {
            return Err(ActuatorFault::ConfigError(
                "ack_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Simulation driver settings, including fault injection.
///
/// # TOML Example
///
/// ```toml
/// [actuators.simulation]
/// fail_action = "feed"
/// fail_after = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Simulate a brick that is switched off or unplugged.
    #[serde(default)]
    pub link_down: bool,

    /// Action that stops acknowledging.
    #[serde(default)]
    pub fail_action: Option<ActuatorAction>,

    /// Number of successful calls of `fail_action` before it faults.
    #[serde(default)]
    pub fail_after: u32,
}
