//! Service context bundling the record store and the code book.

use crate::adapters::{
    CloudDriveStore, LocalFileStore, MemoryStore, ObjectStorageStore, RelationalStore,
};
use crate::config::{AppConfig, StorageConfig};
use crate::customer::codes::CodeBook;
use crate::customer::generator::CustomerIdGenerator;
use crate::ports::record_store::{RecordStore, StoreError};
use crate::store::TableStore;

/// Everything a command needs, built once at startup.
///
/// The backend is chosen here and nowhere else; callers only see the
/// [`RecordStore`] trait object.
pub struct ServiceContext {
    /// Backend holding the record table.
    pub store: Box<dyn RecordStore>,
    /// Lookup tables with the configured category resolved.
    pub codes: CodeBook,
}

impl ServiceContext {
    /// Wires an explicit backend.
    #[must_use]
    pub fn new(store: Box<dyn RecordStore>, codes: CodeBook) -> Self {
        Self { store, codes }
    }

    /// Builds the backend selected by `config`. Must run inside a Tokio
    /// runtime: the database pool starts its maintenance task here.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Box<dyn RecordStore> = match &config.storage {
            StorageConfig::Local { path } => Box::new(LocalFileStore::new(path)),
            StorageConfig::S3(settings) => Box::new(ObjectStorageStore::new(settings)?),
            StorageConfig::Db(settings) => Box::new(RelationalStore::new(settings)?),
            StorageConfig::Dropbox(settings) => Box::new(CloudDriveStore::new(settings)),
        };
        Ok(Self::new(store, CodeBook::new(&config.daching_relationship)))
    }

    /// An in-memory context with an empty, not-yet-created table.
    #[must_use]
    pub fn in_memory(daching_relationship: &str) -> Self {
        Self::new(Box::new(MemoryStore::default()), CodeBook::new(daching_relationship))
    }

    /// Opens a generator over this context's backend, creating the table
    /// when the backend reports it missing.
    pub async fn generator(&self) -> CustomerIdGenerator<'_> {
        CustomerIdGenerator::open(TableStore::new(self.store.as_ref()), &self.codes).await
    }

    /// Opens a generator for read-only commands; never writes to the backend.
    pub async fn reader(&self) -> CustomerIdGenerator<'_> {
        CustomerIdGenerator::load(TableStore::new(self.store.as_ref()), &self.codes).await
    }
}
