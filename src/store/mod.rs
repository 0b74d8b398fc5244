//! Table store: the degrading persistence boundary in front of a backend.
//!
//! Backends report failures as [`StoreError`]; this layer swallows them,
//! logs them and hands the caller a usable value instead:
//!
//! ```text
//! exists() failure -> None (unknown)
//! load()   failure -> empty table
//! save()   failure -> logged, returns false
//! ```
//!
//! Callers therefore cannot tell "genuinely empty" from "load failed".

use tracing::{debug, error};

use crate::customer::table::RecordTable;
use crate::ports::record_store::{RecordStore, StoreError};

/// Degrading wrapper around an injected [`RecordStore`].
#[derive(Clone, Copy)]
pub struct TableStore<'a> {
    backend: &'a dyn RecordStore,
}

impl<'a> TableStore<'a> {
    /// Wraps a backend.
    #[must_use]
    pub fn new(backend: &'a dyn RecordStore) -> Self {
        Self { backend }
    }

    /// Whether the backing resource exists; `None` when the backend could
    /// not answer.
    pub async fn exists(&self) -> Option<bool> {
        match self.backend.exists().await {
            Ok(found) => Some(found),
            Err(e) => {
                self.log_failure("exists", &e);
                None
            }
        }
    }

    /// Loads the table; an empty table on failure.
    pub async fn load(&self) -> RecordTable {
        match self.backend.load().await {
            Ok(table) => {
                debug!(location = %self.backend.describe(), rows = table.len(), "loaded record table");
                table
            }
            Err(e) => {
                self.log_failure("load", &e);
                RecordTable::new()
            }
        }
    }

    /// Overwrites the stored table. Returns `false` when the write failed.
    pub async fn save(&self, table: &RecordTable) -> bool {
        match self.backend.save(table).await {
            Ok(()) => {
                debug!(location = %self.backend.describe(), rows = table.len(), "saved record table");
                true
            }
            Err(e) => {
                self.log_failure("save", &e);
                false
            }
        }
    }

    fn log_failure(&self, operation: &str, err: &StoreError) {
        error!(location = %self.backend.describe(), operation, error = %err, "record store failure");
    }
}
