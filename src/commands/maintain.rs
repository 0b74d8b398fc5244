//! `customer-id update` and `customer-id delete` commands.

use crate::api::{DetailResponse, UpdateRequest};
use crate::context::ServiceContext;

use super::{failure, print_json};

/// Execute the `update` command.
///
/// # Errors
///
/// Returns the JSON error body if the ID is not in the table.
pub async fn update(ctx: &ServiceContext, request: &UpdateRequest) -> Result<(), String> {
    let mut generator = ctx.generator().await;
    generator
        .update_info(
            &request.customer_id,
            request.new_company_name.as_deref(),
            request.new_branch_name.as_deref(),
        )
        .await
        .map_err(|e| failure(&e))?;
    print_json(&DetailResponse::new("Customer info updated successfully"))
}

/// Execute the `delete` command.
///
/// # Errors
///
/// Returns the JSON error body if the ID is not in the table.
pub async fn delete(ctx: &ServiceContext, customer_id: &str) -> Result<(), String> {
    let mut generator = ctx.generator().await;
    generator.delete(customer_id).await.map_err(|e| failure(&e))?;
    print_json(&DetailResponse::new("Customer ID deleted successfully"))
}
