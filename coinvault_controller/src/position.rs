//! Carousel routing.
//!
//! The four bins sit on a ring in the fixed order Quarter, Dime, Nickel,
//! Penny. Moving from one bin to another takes at most two 90° steps; an
//! opposite bin is always reached clockwise.

use coinvault_common::coin::{Denomination, RING_SIZE};
use coinvault_common::hal::consts::STEP_ANGLE_DEG;
use coinvault_common::hal::types::Direction;

/// Direction and number of steps for one carousel move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPlan {
    /// Turn direction. Meaningless when `steps == 0`.
    pub direction: Direction,
    /// Number of 90° steps, 0..=2.
    pub steps: u8,
}

impl RotationPlan {
    /// The empty move.
    pub const STAY: Self = Self {
        direction: Direction::Clockwise,
        steps: 0,
    };

    /// True when no motion is needed.
    #[inline]
    pub const fn is_noop(&self) -> bool {
        self.steps == 0
    }

    /// Signed angle in degrees, positive = clockwise.
    pub const fn degrees(&self) -> i32 {
        self.direction.sign() * self.steps as i32 * STEP_ANGLE_DEG as i32
    }

    /// Bin aligned after executing this plan from `from`.
    pub const fn apply(&self, from: Denomination) -> Denomination {
        let steps = self.steps as usize % RING_SIZE;
        match self.direction {
            Direction::Clockwise => Denomination::from_index(from.index() + steps),
            Direction::CounterClockwise => {
                Denomination::from_index(from.index() + RING_SIZE - steps)
            }
        }
    }
}

/// Shortest move from `current` to `target`.
///
/// `delta = (target - current) mod 4`:
///
/// | delta | plan |
/// |-------|------|
/// | 0 | stay |
/// | 1 | clockwise 1 |
/// | 2 | clockwise 2 (tie, always clockwise) |
/// | 3 | counter-clockwise 1 |
pub const fn plan(current: Denomination, target: Denomination) -> RotationPlan {
    let delta = (target.index() + RING_SIZE - current.index()) % RING_SIZE;
    match delta {
        0 => RotationPlan::STAY,
        1 => RotationPlan {
            direction: Direction::Clockwise,
            steps: 1,
        },
        2 => RotationPlan {
            direction: Direction::Clockwise,
            steps: 2,
        },
        _ => RotationPlan {
            direction: Direction::CounterClockwise,
            steps: 1,
        },
    }
}
