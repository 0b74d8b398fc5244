//! Read-only commands: `query`, the `search-*` family and `options`.

use crate::api::{
    option_labels, BranchNamesResponse, CompanyNamesResponse, CustomerIdsResponse, QueryResponse,
};
use crate::cli::OptionTable;
use crate::context::ServiceContext;
use crate::customer::search::SearchScope;

use super::print_json;

/// Execute the `query` command.
///
/// # Errors
///
/// Returns an error string if the response cannot be printed.
pub async fn query(
    ctx: &ServiceContext,
    company_name: &str,
    branch_handling: Option<&str>,
) -> Result<(), String> {
    let generator = ctx.reader().await;
    print_json(&QueryResponse::new(generator.query_by_company_name(company_name, branch_handling)))
}

/// Execute the `search-company` command.
///
/// # Errors
///
/// Returns an error string if the response cannot be printed.
pub async fn search_company(
    ctx: &ServiceContext,
    keyword: &str,
    region: Option<&str>,
    category: Option<&str>,
) -> Result<(), String> {
    let generator = ctx.reader().await;
    let scope = SearchScope { region, category, company_name: None };
    print_json(&CompanyNamesResponse {
        company_names: generator.search_company_name(keyword, scope),
    })
}

/// Execute the `search-branch` command.
///
/// # Errors
///
/// Returns an error string if the response cannot be printed.
pub async fn search_branch(
    ctx: &ServiceContext,
    keyword: &str,
    region: Option<&str>,
    category: Option<&str>,
    company_name: Option<&str>,
) -> Result<(), String> {
    let generator = ctx.reader().await;
    let scope = SearchScope { region, category, company_name };
    print_json(&BranchNamesResponse { branch_names: generator.search_branch_name(keyword, scope) })
}

/// Execute the `search-ids` command.
///
/// # Errors
///
/// Returns an error string if the response cannot be printed.
pub async fn search_ids(ctx: &ServiceContext, keyword: &str) -> Result<(), String> {
    let generator = ctx.reader().await;
    print_json(&CustomerIdsResponse { customer_ids: generator.search_customer_ids(keyword) })
}

/// Execute the `options` command. Does not touch the backend.
///
/// # Errors
///
/// Returns an error string if the response cannot be printed.
pub fn options(ctx: &ServiceContext, table: OptionTable) -> Result<(), String> {
    let entries = match table {
        OptionTable::Regions => ctx.codes.regions(),
        OptionTable::Categories => ctx.codes.categories(),
        OptionTable::ExtraRegionCodes => ctx.codes.extra_regions(),
        OptionTable::BranchHandlings => ctx.codes.branch_handlings(),
    };
    print_json(&option_labels(entries))
}
