//! Command dispatch and handlers.

pub mod assign;
pub mod lookup;
pub mod maintain;
pub mod transfer;

use serde::Serialize;

use crate::api::{ErrorResponse, GenerateRequest, UpdateRequest};
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::customer::error::CustomerIdError;

/// Load configuration, build the context and run the parsed command on a
/// current-thread runtime.
///
/// # Errors
///
/// Returns an error string if configuration, backend setup or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    // Backend clients may spawn pool tasks, so they are built inside the runtime.
    runtime.block_on(async {
        let ctx = ServiceContext::from_config(&config).map_err(|e| e.to_string())?;
        dispatch_with_context(&cli.command, &ctx).await
    })
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Generate { attributes, confirm } => {
            let request =
                GenerateRequest { attributes: attributes.to_attributes(), confirm: *confirm };
            assign::generate(ctx, &request).await
        }
        Command::Preview { attributes } => assign::preview(ctx, &attributes.to_attributes()).await,
        Command::Query { company_name, branch_handling } => {
            lookup::query(ctx, company_name, branch_handling.as_deref()).await
        }
        Command::SearchCompany { keyword, region, category } => {
            lookup::search_company(ctx, keyword, region.as_deref(), category.as_deref()).await
        }
        Command::SearchBranch { keyword, region, category, company_name } => {
            lookup::search_branch(
                ctx,
                keyword,
                region.as_deref(),
                category.as_deref(),
                company_name.as_deref(),
            )
            .await
        }
        Command::SearchIds { keyword } => lookup::search_ids(ctx, keyword).await,
        Command::Update { customer_id, new_company_name, new_branch_name } => {
            let request = UpdateRequest {
                customer_id: customer_id.clone(),
                new_company_name: new_company_name.clone(),
                new_branch_name: new_branch_name.clone(),
            };
            maintain::update(ctx, &request).await
        }
        Command::Delete { customer_id } => maintain::delete(ctx, customer_id).await,
        Command::Import { file } => transfer::import(ctx, file).await,
        Command::Export { output } => transfer::export(ctx, output.as_deref()).await,
        Command::Options { table } => lookup::options(ctx, *table),
    }
}

/// Print a response body as pretty JSON on stdout.
fn print_json<T: Serialize>(body: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(body)
        .map_err(|e| format!("Failed to serialize response: {e}"))?;
    println!("{text}");
    Ok(())
}

/// Render a domain error as the JSON error body.
fn failure(err: &CustomerIdError) -> String {
    let body = ErrorResponse::from(err);
    serde_json::to_string(&body).unwrap_or(body.detail)
}
