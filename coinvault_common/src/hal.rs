//! Actuator abstraction layer.
//!
//! The carousel, feed and lock motors sit behind the [`driver::ActuatorDriver`]
//! trait so the controller never talks to a motor API directly.

pub mod config;
pub mod consts;
pub mod driver;
pub mod types;
