//! Prelude module for common re-exports.
//!
//! ```rust
//! use coinvault_common::prelude::*;
//! ```

// ─── Coins ──────────────────────────────────────────────────────────
pub use crate::coin::Denomination;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, VaultConfig};
pub use crate::hal::config::ActuatorConfig;

// ─── Actuators ──────────────────────────────────────────────────────
pub use crate::hal::driver::{ActuatorDriver, ActuatorFault, DriverFactory};
pub use crate::hal::types::{ActuatorAction, Direction};

// ─── Collaborators ──────────────────────────────────────────────────
pub use crate::io::display::{Backlight, Display, DisplayFrame};
pub use crate::io::panel::{Button, FrontPanel};
pub use crate::io::sensor::{LinkError, SensorCommand, SensorLink};
