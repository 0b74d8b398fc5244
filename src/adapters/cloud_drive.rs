//! Dropbox adapter using the HTTP API v2 over `reqwest`.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::config::CloudDriveSettings;
use crate::customer::table::RecordTable;
use crate::ports::record_store::{RecordStore, StoreError, StoreFuture};

const BACKEND: &str = "dropbox";
const METADATA_URL: &str = "https://api.dropboxapi.com/2/files/get_metadata";
const DOWNLOAD_URL: &str = "https://content.dropboxapi.com/2/files/download";
const UPLOAD_URL: &str = "https://content.dropboxapi.com/2/files/upload";

/// Table file stored in a Dropbox folder.
pub struct CloudDriveStore {
    client: Client,
    access_token: String,
    path: String,
}

/// Argument for metadata and download calls.
#[derive(Serialize)]
struct PathArg<'a> {
    path: &'a str,
}

/// Argument for upload calls.
#[derive(Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    mode: &'a str,
    mute: bool,
}

impl CloudDriveStore {
    /// Creates a store for the file named by `settings`.
    #[must_use]
    pub fn new(settings: &CloudDriveSettings) -> Self {
        Self {
            client: Client::new(),
            access_token: settings.access_token.clone(),
            path: settings.path(),
        }
    }

    fn authorized(&self, url: &str) -> RequestBuilder {
        self.client.post(url).bearer_auth(&self.access_token)
    }

    fn api_arg<T: Serialize>(arg: &T) -> Result<String, StoreError> {
        serde_json::to_string(arg).map_err(|e| StoreError::backend(BACKEND, e))
    }
}

/// Dropbox answers 409 with a `path/not_found` error summary for missing files.
fn is_not_found(status: StatusCode, body: &str) -> bool {
    status == StatusCode::CONFLICT && body.contains("not_found")
}

fn api_error(status: StatusCode, body: &str) -> StoreError {
    StoreError::backend(BACKEND, format!("Dropbox API error ({}): {body}", status.as_u16()))
}

async fn failure(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    api_error(status, &body)
}

impl RecordStore for CloudDriveStore {
    fn describe(&self) -> String {
        format!("dropbox:{}", self.path)
    }

    fn exists(&self) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let response = self
                .authorized(METADATA_URL)
                .json(&PathArg { path: &self.path })
                .send()
                .await
                .map_err(|e| StoreError::backend(BACKEND, e))?;

            let status = response.status();
            if status.is_success() {
                return Ok(true);
            }
            let body = response.text().await.map_err(|e| StoreError::backend(BACKEND, e))?;
            if is_not_found(status, &body) {
                Ok(false)
            } else {
                Err(api_error(status, &body))
            }
        })
    }

    fn load(&self) -> StoreFuture<'_, RecordTable> {
        Box::pin(async move {
            let response = self
                .authorized(DOWNLOAD_URL)
                .header("Dropbox-API-Arg", Self::api_arg(&PathArg { path: &self.path })?)
                .send()
                .await
                .map_err(|e| StoreError::backend(BACKEND, e))?;

            let status = response.status();
            if status == StatusCode::CONFLICT {
                let body = response.text().await.map_err(|e| StoreError::backend(BACKEND, e))?;
                if is_not_found(status, &body) {
                    return Ok(RecordTable::new());
                }
                return Err(api_error(status, &body));
            }
            if !status.is_success() {
                return Err(failure(response).await);
            }

            let bytes = response.bytes().await.map_err(|e| StoreError::backend(BACKEND, e))?;
            Ok(RecordTable::from_csv(&bytes)?)
        })
    }

    fn save<'a>(&'a self, table: &'a RecordTable) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let bytes = table.to_csv()?;
            let arg = Self::api_arg(&UploadArg { path: &self.path, mode: "overwrite", mute: true })?;

            let response = self
                .authorized(UPLOAD_URL)
                .header("Dropbox-API-Arg", arg)
                .header("Content-Type", "application/octet-stream")
                .body(bytes)
                .send()
                .await
                .map_err(|e| StoreError::backend(BACKEND, e))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(failure(response).await)
            }
        })
    }
}
