//! Record store port for loading and saving the whole record table.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::customer::table::RecordTable;

/// Boxed future type alias used by [`RecordStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// A failure inside a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the request.
    #[error("{backend} request failed: {source}")]
    Backend {
        /// Short backend name (e.g. `"s3"`).
        backend: &'static str,
        /// Underlying error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The stored resource is not a readable table.
    #[error("stored table is malformed: {0}")]
    Format(#[from] csv::Error),
}

impl StoreError {
    /// Wraps a backend error.
    pub fn backend(backend: &'static str, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Backend { backend, source: source.into() }
    }
}

/// Persists the full record table as a single resource.
///
/// Every backend behaves the same from the caller's side: `load` of a
/// missing resource yields an empty table, and `save` overwrites the whole
/// resource. There is no partial write and no concurrency control.
pub trait RecordStore: Send + Sync {
    /// Short human-readable location used in log lines.
    fn describe(&self) -> String;

    /// Returns `true` if the backing resource exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot answer.
    fn exists(&self) -> StoreFuture<'_, bool>;

    /// Loads the whole table, or an empty one if the resource is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored bytes are malformed.
    fn load(&self) -> StoreFuture<'_, RecordTable>;

    /// Overwrites the resource with `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save<'a>(&'a self, table: &'a RecordTable) -> StoreFuture<'a, ()>;
}
