//! Simulation driver module.
//!
//! Software stand-in for the actuator brick: no motors, but the same
//! open-loop bookkeeping, dwell times and fault behaviour.

mod driver;
mod mechanics;

pub use driver::SimulationDriver;
pub use mechanics::Mechanics;

use coinvault_common::hal::driver::ActuatorDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn ActuatorDriver> {
    Box::new(SimulationDriver::new())
}
