//! Durable ledger file.
//!
//! `load` fails soft: a missing or malformed file yields the zero state and a
//! dirty flag so the caller rewrites it before accepting input. `save` fails
//! hard and is synchronous: the record is written to a sibling temp file,
//! synced, then renamed over the ledger, so a crash leaves either the old or
//! the new record on disk, never a torn one.

use super::state::{LedgerState, MalformedLedger};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Persistence fault. Fatal for the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger exists but cannot be read.
    #[error("Failed to read ledger {path:?}: {reason}")]
    Read {
        /// Ledger path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// The ledger cannot be written.
    #[error("Failed to write ledger {path:?}: {reason}")]
    Write {
        /// Ledger path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },
}

/// Result of [`PersistedLedger::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLoad {
    /// State to run with.
    pub state: LedgerState,
    /// The file must be rewritten before any input is accepted.
    pub dirty: bool,
    /// Why the file was discarded, when it was.
    pub malformed: Option<MalformedLedger>,
}

/// The ledger text file.
#[derive(Debug, Clone)]
pub struct PersistedLedger {
    path: PathBuf,
}

impl PersistedLedger {
    /// Ledger stored at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Load the ledger.
    ///
    /// # Errors
    /// `LedgerError::Read` only when the file exists but cannot be read.
    /// Missing or malformed content is not an error.
    pub fn load(&self) -> Result<LedgerLoad, LedgerError> {
        debug!("Loading ledger from {:?}", self.path);

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No ledger at {:?}, starting from zero", self.path);
                return Ok(LedgerLoad {
                    state: LedgerState::zero(),
                    dirty: true,
                    malformed: None,
                });
            }
            Err(e) => {
                return Err(LedgerError::Read {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        match LedgerState::decode(&text) {
            Ok(decoded) => {
                let consistent = decoded.is_consistent();
                if !consistent {
                    warn!(
                        "Ledger total {} disagrees with counts, using {}",
                        decoded.stored_total,
                        decoded.state.total()
                    );
                }
                // Equal in value but not in bytes (`0.1`, CRLF): rewrite so
                // every later save reproduces the file exactly.
                let canonical = decoded.state.encode() == text;
                if consistent && !canonical {
                    info!("Ledger {:?} is not in canonical form", self.path);
                }
                let dirty = !consistent || !canonical;
                info!(
                    "Loaded ledger: total={}, position={}, counts={:?}",
                    decoded.state.total(),
                    decoded.state.position(),
                    decoded.state.counts()
                );
                Ok(LedgerLoad {
                    state: decoded.state,
                    dirty,
                    malformed: None,
                })
            }
            Err(reason) => {
                warn!("Malformed ledger {:?} ({}), resetting to zero", self.path, reason);
                Ok(LedgerLoad {
                    state: LedgerState::zero(),
                    dirty: true,
                    malformed: Some(reason),
                })
            }
        }
    }

    /// Write `state` durably. Returns once the record is on disk.
    pub fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        let write_err = |e: std::io::Error| LedgerError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp = self.temp_path();
        let mut file = File::create(&temp).map_err(write_err)?;
        file.write_all(state.encode().as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        if let Err(e) = fs::rename(&temp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!("Could not remove {:?}: {}", temp, cleanup);
            }
            return Err(write_err(e));
        }

        debug!(
            "Saved ledger: total={}, position={}",
            state.total(),
            state.position()
        );
        Ok(())
    }
}
