//! The vault ledger: coin counts, exact total and carousel position.
//!
//! - [`state`] - In-memory `LedgerState` and its text record format
//! - [`store`] - `PersistedLedger`, the durable file behind it

pub mod state;
pub mod store;

pub use state::{LedgerState, MalformedLedger};
pub use store::{LedgerError, LedgerLoad, PersistedLedger};
