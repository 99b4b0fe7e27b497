//! Coinvault Common Library
//!
//! Shared types, driver traits and configuration loading for all coinvault
//! workspace crates.
//!
//! # Module Structure
//!
//! - [`coin`] - The four denominations and their carousel ring
//! - [`hal`] - Actuator driver trait, fault type and motor constants
//! - [`io`] - Display, front panel and sensor link collaborators
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use coinvault_common::prelude::*;
//!
//! assert_eq!(Denomination::Quarter.next(), Denomination::Dime);
//! ```

pub mod coin;
pub mod config;
pub mod hal;
pub mod io;
pub mod prelude;
