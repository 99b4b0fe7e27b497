//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `ActuatorDriver` trait on top of the
//! open-loop [`Mechanics`] model, honouring the configured dwell times and
//! the fault injection settings.

use super::mechanics::Mechanics;
use coinvault_common::hal::config::{ActuatorConfig, SimulationConfig};
use coinvault_common::hal::driver::{ActuatorDriver, ActuatorFault};
use coinvault_common::hal::types::{ActuatorAction, Direction, MotorCommand, MotorPort};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Simulation driver implementing the ActuatorDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Motor constants (set on init)
    config: ActuatorConfig,
    /// Initialized flag
    initialized: bool,
    /// Mechanics model (created on init)
    mechanics: Option<Mechanics>,
    /// Successful calls per action, for fault injection
    calls: HashMap<ActuatorAction, u32>,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            config: ActuatorConfig::default(),
            initialized: false,
            mechanics: None,
            calls: HashMap::new(),
        }
    }

    /// Mechanics model, once initialized.
    pub fn mechanics(&self) -> Option<&Mechanics> {
        self.mechanics.as_ref()
    }

    /// Check link and fault injection for `action`, then count the call.
    fn begin(&mut self, action: ActuatorAction) -> Result<&mut Mechanics, ActuatorFault> {
        let SimulationConfig {
            link_down,
            fail_action,
            fail_after,
        } = self.config.simulation;

        if !self.initialized || link_down {
            return Err(ActuatorFault::LinkUnavailable(
                "simulated brick not connected".to_string(),
            ));
        }

        let count = self.calls.entry(action).or_insert(0);
        if fail_action == Some(action) && *count >= fail_after {
            warn!("Injected fault on {} after {} calls", action, count);
            return Err(ActuatorFault::NotAcknowledged {
                action,
                timeout_ms: self.config.ack_timeout_ms,
            });
        }
        *count += 1;

        self.mechanics
            .as_mut()
            .ok_or_else(|| ActuatorFault::InitFailed("mechanics not initialized".to_string()))
    }

    fn dwell(duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, config: &ActuatorConfig) -> Result<(), ActuatorFault> {
        config.validate()?;

        if config.simulation.link_down {
            return Err(ActuatorFault::LinkUnavailable(
                "simulated brick not found".to_string(),
            ));
        }

        info!(
            "Initializing simulation driver: step={}deg, lock={}deg, feed={}deg",
            config.step_angle_deg, config.lock_distance_deg, config.feed_distance_deg
        );
        if let Some(action) = config.simulation.fail_action {
            info!(
                "Fault injection armed: {} fails after {} calls",
                action, config.simulation.fail_after
            );
        }

        self.config = config.clone();
        self.mechanics = Some(Mechanics::new(config.lock_distance_deg));
        self.calls.clear();
        self.initialized = true;
        Ok(())
    }

    fn rotate(&mut self, direction: Direction, steps: u8) -> Result<(), ActuatorFault> {
        if steps == 0 {
            return Ok(());
        }
        let power = i16::from(self.config.rotate_power) * direction.sign() as i16;
        let degrees = self.config.step_angle_deg * u32::from(steps);
        let settle = self.config.settle();

        let mechanics = self.begin(ActuatorAction::Rotate)?;
        mechanics.apply(MotorCommand {
            port: MotorPort::Rotate,
            power,
            degrees,
        });
        debug!("Carousel {} {} steps ({}deg)", direction, steps, degrees);
        Self::dwell(settle);
        Ok(())
    }

    fn feed_one_coin(&mut self) -> Result<(), ActuatorFault> {
        let power = i16::from(self.config.feed_power);
        let degrees = self.config.feed_distance_deg;
        let pause = self.config.feed_pause();

        let mechanics = self.begin(ActuatorAction::Feed)?;
        mechanics.apply(MotorCommand {
            port: MotorPort::Feed,
            power,
            degrees,
        });
        Self::dwell(pause);
        mechanics.apply(MotorCommand {
            port: MotorPort::Feed,
            power: -power,
            degrees,
        });
        mechanics.coin_dropped();
        debug!("Fed one coin ({} total)", mechanics.coins_fed());
        Ok(())
    }

    fn set_lock(&mut self, engaged: bool) -> Result<(), ActuatorFault> {
        let magnitude = i16::from(self.config.lock_power);
        let power = if engaged { magnitude } else { -magnitude };
        let degrees = self.config.lock_distance_deg;

        let mechanics = self.begin(ActuatorAction::Lock)?;
        mechanics.apply(MotorCommand {
            port: MotorPort::Lock,
            power,
            degrees,
        });
        debug!("Lock {}", if engaged { "engaged" } else { "released" });
        Ok(())
    }

    fn release_rotation(&mut self) -> Result<(), ActuatorFault> {
        let mechanics = self.begin(ActuatorAction::Release)?;
        mechanics.release();
        debug!("Carousel motor idle");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), ActuatorFault> {
        info!("Shutting down simulation driver");
        if let Some(mechanics) = &self.mechanics {
            info!(
                "Final mechanics: angle={}deg, locked={}, coins_fed={}",
                mechanics.angle_deg(),
                mechanics.is_locked(),
                mechanics.coins_fed()
            );
        }
        self.initialized = false;
        Ok(())
    }
}
