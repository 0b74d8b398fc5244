//! `customer-id import` and `customer-id export` commands.

use std::io::Write;
use std::path::Path;

use crate::api::{DetailResponse, ImportResponse};
use crate::context::ServiceContext;

use super::{failure, print_json};

/// Execute the `import` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or is not a table file.
pub async fn import(ctx: &ServiceContext, file: &Path) -> Result<(), String> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let mut generator = ctx.generator().await;
    let added = generator.import(&bytes).await.map_err(|e| failure(&e))?;
    print_json(&ImportResponse { detail: "Table file imported successfully".to_string(), added })
}

/// Execute the `export` command.
///
/// Writes the CSV to `output`, or raw to stdout when no path is given.
///
/// # Errors
///
/// Returns an error string if serialization or the write fails.
pub async fn export(ctx: &ServiceContext, output: Option<&Path>) -> Result<(), String> {
    let generator = ctx.reader().await;
    let bytes = generator.export().map_err(|e| failure(&e))?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            print_json(&DetailResponse::new(format!("Exported to {}", path.display())))
        }
        None => std::io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("Failed to write to stdout: {e}")),
    }
}
