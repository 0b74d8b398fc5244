//! `customer-id generate` and `customer-id preview` commands.

use crate::api::{GenerateRequest, GenerateResponse, GenerateStatus, PreviewResponse};
use crate::context::ServiceContext;
use crate::customer::error::CustomerIdError;
use crate::customer::record::CustomerAttributes;

use super::{failure, print_json};

/// Execute the `generate` command.
///
/// Without `confirm` this is exactly a preview: nothing is written.
///
/// # Errors
///
/// Returns an error string if the attributes fail validation.
pub async fn generate(ctx: &ServiceContext, request: &GenerateRequest) -> Result<(), String> {
    let attributes = &request.attributes;
    ctx.codes.validate(attributes).map_err(|e| failure(&CustomerIdError::from(e)))?;

    let response = if request.confirm {
        let mut generator = ctx.generator().await;
        GenerateResponse::from(generator.generate(attributes).await)
    } else {
        let generator = ctx.reader().await;
        GenerateResponse {
            customer_id: generator.preview(attributes),
            status: GenerateStatus::Preview,
            conflict: false,
        }
    };
    print_json(&response)
}

/// Execute the `preview` command.
///
/// # Errors
///
/// Returns an error string if the attributes fail validation.
pub async fn preview(ctx: &ServiceContext, attributes: &CustomerAttributes) -> Result<(), String> {
    ctx.codes.validate(attributes).map_err(|e| failure(&CustomerIdError::from(e)))?;
    let generator = ctx.reader().await;
    print_json(&PreviewResponse { customer_id: generator.preview(attributes) })
}
