//! In-process record store for tests and dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::customer::record::CustomerRecord;
use crate::customer::table::RecordTable;
use crate::ports::record_store::{RecordStore, StoreError, StoreFuture};

/// Keeps the table in memory. Starts out missing unless seeded.
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<Option<RecordTable>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates a store whose resource already exists with `records`.
    #[must_use]
    pub fn with_records(records: Vec<CustomerRecord>) -> Self {
        Self { table: Mutex::new(Some(RecordTable::from_records(records))), saves: AtomicUsize::new(0) }
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// A copy of the stored table, `None` while the resource is missing.
    #[must_use]
    pub fn snapshot(&self) -> Option<RecordTable> {
        self.table.lock().ok().and_then(|t| t.clone())
    }
}

impl RecordStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn exists(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let guard = self.table.lock().map_err(|e| StoreError::backend("memory", e.to_string()))?;
            Ok(guard.is_some())
        })
    }

    fn load(&self) -> StoreFuture<'_, RecordTable> {
        Box::pin(async move {
            let guard = self.table.lock().map_err(|e| StoreError::backend("memory", e.to_string()))?;
            Ok(guard.clone().unwrap_or_default())
        })
    }

    fn save<'a>(&'a self, table: &'a RecordTable) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut guard =
                self.table.lock().map_err(|e| StoreError::backend("memory", e.to_string()))?;
            *guard = Some(table.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
