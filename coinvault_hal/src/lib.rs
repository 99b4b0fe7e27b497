//! # Coinvault HAL Library
//!
//! Actuator drivers behind the `ActuatorDriver` trait defined in
//! `coinvault_common::hal::driver`, plus a console front end standing in for
//! the LCD plate and the serial sensor module.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations (simulation, console)
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     coinvault_hal                         │
//! │  ┌──────────────────┐        ┌─────────────────────────┐  │
//! │  │ DriverRegistry   │──────► │ ActuatorDriver (trait)  │  │
//! │  │ name → factory   │        │  └ SimulationDriver     │  │
//! │  └──────────────────┘        └─────────────────────────┘  │
//! │  ┌──────────────────────────────────────────────────────┐ │
//! │  │ console: ConsoleDisplay, ConsolePanel, ConsoleLink   │ │
//! │  └──────────────────────────────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
