//! Actuator constants.
//!
//! Defaults match the mechanics of the LEGO build: a 90° carousel
//! step, a 160° lock throw and a 27° feed kick.

/// Canonical service name (used for logging).
pub const SERVICE_NAME: &str = "coinvault";

/// Default driver name.
pub const DEFAULT_DRIVER: &str = "simulation";

/// Angle of one carousel step in degrees.
pub const STEP_ANGLE_DEG: u32 = 90;

/// Rotate motor power (percent).
pub const ROTATE_POWER: u8 = 70;

/// Feed motor power (percent).
pub const FEED_POWER: u8 = 25;

/// Lock motor power (percent).
pub const LOCK_POWER: u8 = 70;

/// Lock motor travel between the locked and unlocked extremes (degrees).
pub const LOCK_DISTANCE_DEG: u32 = 160;

/// Feed motor kick per coin (degrees).
pub const FEED_DISTANCE_DEG: u32 = 27;

/// Dwell after a carousel move before feeding (ms).
pub const SETTLE_MS: u64 = 250;

/// Pause between the forward and return stroke of the feed (ms).
pub const FEED_PAUSE_MS: u64 = 1000;

/// Time allowed for an action to acknowledge (ms).
pub const ACK_TIMEOUT_MS: u64 = 2000;

/// Default ledger file path.
pub const DEFAULT_LEDGER_PATH: &str = "data.txt";
