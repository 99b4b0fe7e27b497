//! # Coinvault Controller Library
//!
//! Control logic for a coin-sorting safe. Coins reported by the sensor module
//! are routed to one of four bins by turning a carousel, the running tally is
//! kept in a durable ledger, and the door lock opens after fingerprint
//! authentication.
//!
//! ## Layers
//!
//! 1. **[`position`]** — shortest carousel move between two bins
//! 2. **[`classifier`]** — serial token → denomination / auth success
//! 3. **[`ledger`]** — counts, total and carousel position, persisted as text
//! 4. **[`state`]** — operating mode transition table
//! 5. **[`controller`]** — the `BankController` sequencing all of the above
//!
//! ## Loop Model
//!
//! Single-threaded: each iteration takes one button press or one serial line
//! and finishes all of its effects (motion, ledger write, display) before the
//! next. Actuator calls block.

pub mod classifier;
pub mod controller;
pub mod error;
pub mod ledger;
pub mod position;
pub mod screens;
pub mod state;

pub use crate::controller::{BankController, Flow};
pub use crate::error::ControllerError;
