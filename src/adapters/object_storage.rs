//! S3-compatible object storage adapter built on `opendal`.

use opendal::{services::S3, ErrorKind, Operator};

use crate::config::ObjectStorageSettings;
use crate::customer::table::RecordTable;
use crate::ports::record_store::{RecordStore, StoreError, StoreFuture};

const BACKEND: &str = "s3";

/// Table file stored as a single object in a bucket.
pub struct ObjectStorageStore {
    operator: Operator,
    bucket: String,
    key: String,
}

impl ObjectStorageStore {
    /// Builds the operator from settings. No request is made until first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be configured.
    pub fn new(settings: &ObjectStorageSettings) -> Result<Self, StoreError> {
        let mut builder = S3::default();
        builder
            .bucket(&settings.bucket)
            .region(&settings.region)
            .access_key_id(&settings.access_key_id)
            .secret_access_key(&settings.secret_access_key);
        if let Some(endpoint) = &settings.endpoint {
            builder.endpoint(endpoint);
        }
        let operator =
            Operator::new(builder).map_err(|e| StoreError::backend(BACKEND, e))?.finish();

        Ok(Self { operator, bucket: settings.bucket.clone(), key: settings.key() })
    }
}

impl RecordStore for ObjectStorageStore {
    fn describe(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    fn exists(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            self.operator.is_exist(&self.key).await.map_err(|e| StoreError::backend(BACKEND, e))
        })
    }

    fn load(&self) -> StoreFuture<'_, RecordTable> {
        Box::pin(async move {
            match self.operator.read(&self.key).await {
                Ok(bytes) => Ok(RecordTable::from_csv(&bytes)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(RecordTable::new()),
                Err(e) => Err(StoreError::backend(BACKEND, e)),
            }
        })
    }

    fn save<'a>(&'a self, table: &'a RecordTable) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let bytes = table.to_csv()?;
            self.operator.write(&self.key, bytes).await.map_err(|e| StoreError::backend(BACKEND, e))
        })
    }
}
