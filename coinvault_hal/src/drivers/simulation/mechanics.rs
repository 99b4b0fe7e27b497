//! Simulated mechanics of the vault: carousel angle, lock bolt, feed counter.
//!
//! Everything is open-loop: a motor command moves the model by exactly the
//! commanded travel.

use coinvault_common::hal::types::{MotorCommand, MotorPort};
use std::collections::VecDeque;

/// Most recent motor commands kept in the log.
pub const LOG_CAPACITY: usize = 64;

/// Open-loop model of the three motors.
#[derive(Debug, Clone)]
pub struct Mechanics {
    /// Signed carousel angle in degrees, positive = clockwise.
    angle_deg: i64,
    /// Lock bolt position in degrees, 0 = fully unlocked.
    lock_deg: i64,
    /// Lock travel between extremes.
    lock_travel: u32,
    /// Rotate motor released to free-spin.
    free_spin: bool,
    /// Completed feed cycles.
    coins_fed: u64,
    /// Last `LOG_CAPACITY` motor commands, oldest first.
    log: VecDeque<MotorCommand>,
}

impl Mechanics {
    /// New model with the lock engaged and the carousel at 0°.
    pub fn new(lock_travel: u32) -> Self {
        Self {
            angle_deg: 0,
            lock_deg: i64::from(lock_travel),
            lock_travel,
            free_spin: false,
            coins_fed: 0,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Apply one motor command.
    pub fn apply(&mut self, command: MotorCommand) {
        let travel = i64::from(command.degrees) * i64::from(command.power.signum());
        match command.port {
            MotorPort::Rotate => {
                self.free_spin = false;
                self.angle_deg += travel;
            }
            MotorPort::Lock => {
                self.lock_deg = (self.lock_deg + travel).clamp(0, i64::from(self.lock_travel));
            }
            // The feed returns to its rest position each cycle; nothing to track
            // per stroke.
            MotorPort::Feed => {}
        }
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(command);
    }

    /// Record a completed feed cycle.
    pub fn coin_dropped(&mut self) {
        self.coins_fed += 1;
    }

    /// Let the carousel free-spin.
    pub fn release(&mut self) {
        self.free_spin = true;
    }

    /// Signed carousel angle.
    pub fn angle_deg(&self) -> i64 {
        self.angle_deg
    }

    /// Carousel slot (0..4) for a given step angle.
    pub fn slot(&self, step_angle_deg: u32) -> usize {
        let steps = self.angle_deg.div_euclid(i64::from(step_angle_deg));
        steps.rem_euclid(4) as usize
    }

    /// True when the bolt sits at the locked extreme.
    pub fn is_locked(&self) -> bool {
        self.lock_deg == i64::from(self.lock_travel)
    }

    /// True while the carousel motor is released.
    pub fn is_free_spinning(&self) -> bool {
        self.free_spin
    }

    /// Completed feed cycles.
    pub fn coins_fed(&self) -> u64 {
        self.coins_fed
    }

    /// Recent motor commands, oldest first.
    pub fn log(&self) -> &VecDeque<MotorCommand> {
        &self.log
    }
}
