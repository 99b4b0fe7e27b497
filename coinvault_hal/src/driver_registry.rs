//! Actuator driver lookup by name.
//!
//! The binary builds one registry at startup with [`DriverRegistry::with_builtin`]
//! and creates the driver named by `[actuators] driver` (or `--driver`).

use coinvault_common::hal::driver::{ActuatorDriver, ActuatorFault, DriverFactory};
use std::collections::BTreeMap;
use tracing::debug;

/// Name → factory map for actuator drivers.
#[derive(Default)]
pub struct DriverRegistry {
    factories: BTreeMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Registry with no drivers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in driver.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Add a driver under `name`.
    ///
    /// # Panics
    /// Panics if `name` is already taken; driver names are fixed at build time.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.insert(name, factory).is_some() {
            panic!("Driver '{name}' is already registered");
        }
        debug!("Registered actuator driver '{}'", name);
    }

    /// Factory registered under `name`.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Build a fresh, uninitialized driver.
    ///
    /// # Errors
    /// `ActuatorFault::DriverNotFound` for an unknown name.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn ActuatorDriver>, ActuatorFault> {
        match self.get_factory(name) {
            Some(factory) => Ok(factory()),
            None => Err(ActuatorFault::DriverNotFound(format!(
                "{name} (available: {})",
                self.list_drivers().join(", ")
            ))),
        }
    }

    /// Registered names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}
