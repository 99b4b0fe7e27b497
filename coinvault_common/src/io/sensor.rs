//! Serial link to the coin acceptor and fingerprint sensor module.
//!
//! Line-oriented and best-effort: lines may be garbled or partial, and the
//! controller drops anything it does not recognise.

use thiserror::Error;

/// Single-character commands sent to the sensor module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorCommand {
    /// Ask the fingerprint reader for a scan.
    RequestScan,
    /// Acknowledge that the door is opening.
    DoorOpenAck,
}

impl SensorCommand {
    /// Wire byte.
    pub const fn code(self) -> u8 {
        match self {
            SensorCommand::RequestScan => b'F',
            SensorCommand::DoorOpenAck => b'C',
        }
    }
}

/// Serial link error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The link was closed by the other side.
    #[error("Sensor link closed")]
    Closed,

    /// Read or write failed.
    #[error("Sensor link I/O error: {0}")]
    Io(String),
}

/// Bidirectional line link to the sensor module.
pub trait SensorLink {
    /// Read one line. Returns `Ok(None)` when nothing arrived within the
    /// link's read timeout.
    fn read_line(&mut self) -> Result<Option<String>, LinkError>;

    /// Send a single-character command.
    fn send(&mut self, command: SensorCommand) -> Result<(), LinkError>;

    /// Discard any buffered input.
    fn flush_input(&mut self);
}
