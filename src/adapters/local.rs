//! Local disk adapter: the table lives in one CSV file.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::customer::table::RecordTable;
use crate::ports::record_store::{RecordStore, StoreError, StoreFuture};

const BACKEND: &str = "local";

/// Table file on the local filesystem.
pub struct LocalFileStore {
    path: PathBuf,
}

impl LocalFileStore {
    /// Creates a store for the file at `path`. Nothing is touched until used.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for LocalFileStore {
    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }

    fn exists(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            tokio::fs::try_exists(&self.path).await.map_err(|e| StoreError::backend(BACKEND, e))
        })
    }

    fn load(&self) -> StoreFuture<'_, RecordTable> {
        Box::pin(async move {
            match tokio::fs::read(&self.path).await {
                Ok(bytes) => Ok(RecordTable::from_csv(&bytes)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(RecordTable::new()),
                Err(e) => Err(StoreError::backend(BACKEND, e)),
            }
        })
    }

    fn save<'a>(&'a self, table: &'a RecordTable) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let bytes = table.to_csv()?;
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::backend(BACKEND, e))?;
            }
            tokio::fs::write(&self.path, bytes).await.map_err(|e| StoreError::backend(BACKEND, e))
        })
    }
}
