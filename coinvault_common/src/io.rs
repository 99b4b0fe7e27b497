//! Operator-facing and sensor-facing collaborators.
//!
//! The controller consumes these through traits; concrete backends (console,
//! LCD plate, serial tty) live in `coinvault_hal` or outside the workspace.

pub mod display;
pub mod panel;
pub mod sensor;
