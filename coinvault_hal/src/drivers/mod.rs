//! Driver implementations.
//!
//! - [`simulation`] - Software actuator driver for development and testing
//! - [`console`] - Terminal stand-ins for the LCD plate and the serial link
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `ActuatorDriver` trait from `coinvault_common::hal::driver`
//! 3. Register the driver in [`register_all_drivers`]

pub mod console;
pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register all built-in actuator drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_driver);
}
