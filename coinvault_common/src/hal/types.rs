//! Actuator command types.

use std::fmt;

/// Carousel rotation direction. Clockwise is the motor's positive power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Positive motor power, advances the ring index.
    Clockwise,
    /// Negative motor power, decreases the ring index.
    CounterClockwise,
}

impl Direction {
    /// Sign of the motor power for this direction.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => f.write_str("CW"),
            Direction::CounterClockwise => f.write_str("CCW"),
        }
    }
}

/// The physical actions the facade exposes. Used to tag faults and for
/// fault injection in the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorAction {
    /// Carousel move.
    Rotate,
    /// One feed cycle.
    Feed,
    /// Lock engage / disengage.
    Lock,
    /// Rotate motor released to free-spin.
    Release,
}

impl fmt::Display for ActuatorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActuatorAction::Rotate => "rotate",
            ActuatorAction::Feed => "feed",
            ActuatorAction::Lock => "lock",
            ActuatorAction::Release => "release",
        };
        f.write_str(s)
    }
}

/// Motor port on the actuator brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorPort {
    /// Port A, lock bolt.
    Lock,
    /// Port B, coin feed.
    Feed,
    /// Port C, carousel.
    Rotate,
}

/// A raw open-loop motor command: run `port` at signed `power` for `degrees`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand {
    /// Target motor.
    pub port: MotorPort,
    /// Signed power in percent; the sign selects the direction.
    pub power: i16,
    /// Travel in degrees.
    pub degrees: u32,
}
