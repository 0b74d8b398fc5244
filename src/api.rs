//! Request and response bodies of the customer ID interface.
//!
//! Transport-agnostic: the CLI prints these as JSON, and any server front
//! end can reuse them unchanged.

use serde::{Deserialize, Serialize};

use crate::customer::codes::CodeEntry;
use crate::customer::error::CustomerIdError;
use crate::customer::generator::{Assignment, AssignmentStatus};
use crate::customer::record::{CustomerAttributes, CustomerRecord};

/// Body of a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateRequest {
    /// Attributes the ID is derived from.
    #[serde(flatten)]
    pub attributes: CustomerAttributes,
    /// Persist the ID when `true`; otherwise behave like a preview.
    #[serde(default)]
    pub confirm: bool,
}

/// Whether a generate call persisted its ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStatus {
    /// The ID was recorded (or already existed).
    Generated,
    /// Nothing was written.
    Preview,
}

/// Response of a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateResponse {
    /// The computed customer ID.
    pub customer_id: String,
    /// Whether it was persisted.
    pub status: GenerateStatus,
    /// Set when another row with different attributes already holds the
    /// ID; nothing was written in that case.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub conflict: bool,
}

impl From<Assignment> for GenerateResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            conflict: assignment.status == AssignmentStatus::Conflict,
            customer_id: assignment.customer_id,
            status: GenerateStatus::Generated,
        }
    }
}

/// Response of a preview request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewResponse {
    /// The ID the attributes would receive.
    pub customer_id: String,
}

/// Response of a company-name query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResponse {
    /// Human-readable outcome.
    pub detail: String,
    /// Matching rows, possibly empty.
    pub data: Vec<CustomerRecord>,
}

impl QueryResponse {
    /// Wraps query results with the matching detail message.
    #[must_use]
    pub fn new(data: Vec<CustomerRecord>) -> Self {
        let detail = if data.is_empty() { "Customer ID not found" } else { "Customer ID found" };
        Self { detail: detail.to_string(), data }
    }
}

/// Company-name search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyNamesResponse {
    /// Distinct matching company names.
    pub company_names: Vec<String>,
}

/// Branch-name search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchNamesResponse {
    /// Distinct matching branch names.
    pub branch_names: Vec<String>,
}

/// Customer-ID search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerIdsResponse {
    /// Distinct matching IDs.
    pub customer_ids: Vec<String>,
}

/// Body of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRequest {
    /// ID whose rows are corrected.
    pub customer_id: String,
    /// Replacement company name; blank or absent keeps the current one.
    #[serde(default)]
    pub new_company_name: Option<String>,
    /// Replacement branch name; blank or absent keeps the current one.
    #[serde(default)]
    pub new_branch_name: Option<String>,
}

/// A bare outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailResponse {
    /// Human-readable outcome.
    pub detail: String,
}

impl DetailResponse {
    /// Creates a detail message.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

/// Response of an import request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResponse {
    /// Human-readable outcome.
    pub detail: String,
    /// Rows added; rows whose ID was already present are skipped.
    pub added: usize,
}

/// An error as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Error message.
    pub detail: String,
}

impl From<&CustomerIdError> for ErrorResponse {
    fn from(err: &CustomerIdError) -> Self {
        let detail = match err {
            CustomerIdError::NotFound { .. } => "Customer ID not found".to_string(),
            other => other.to_string(),
        };
        Self { status: err.status_code(), detail }
    }
}

/// Labels of a lookup table, in display order.
#[must_use]
pub fn option_labels(entries: &[CodeEntry]) -> Vec<String> {
    entries.iter().map(|e| e.label.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_flattens_attributes() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"region":"1北投","category":"2單一客戶","company_name":"Acme","confirm":true}"#,
        )
        .unwrap();

        assert!(request.confirm);
        assert_eq!(request.attributes.company_name, "Acme");
        assert_eq!(request.attributes.branch_name, None);
    }

    #[test]
    fn generate_request_treats_blank_fields_as_absent() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"region":"3高雄","category":"8達清關係企業","company_name":"Hooli",
                "extra_region_code":"","branch_name":"","branch_handling":" "}"#,
        )
        .unwrap();

        assert_eq!(request.attributes, CustomerAttributes::new("3高雄", "8達清關係企業", "Hooli"));
        assert!(!request.confirm);
    }

    #[test]
    fn query_detail_reflects_emptiness() {
        assert_eq!(QueryResponse::new(Vec::new()).detail, "Customer ID not found");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = CustomerIdError::NotFound { customer_id: "12000009".to_string() };
        let response = ErrorResponse::from(&err);
        assert_eq!(response.status, 404);
        assert_eq!(response.detail, "Customer ID not found");
    }

    #[test]
    fn generate_status_serializes_lowercase() {
        let body = serde_json::to_value(GenerateResponse {
            customer_id: "12000001".to_string(),
            status: GenerateStatus::Preview,
            conflict: false,
        })
        .unwrap();
        assert_eq!(body["status"], "preview");
        assert!(body.get("conflict").is_none());
    }

    #[test]
    fn conflicting_assignment_is_flagged() {
        let body = serde_json::to_value(GenerateResponse::from(Assignment {
            customer_id: "12000001".to_string(),
            status: AssignmentStatus::Conflict,
        }))
        .unwrap();
        assert_eq!(body["status"], "generated");
        assert_eq!(body["conflict"], true);

        let created = GenerateResponse::from(Assignment {
            customer_id: "12000002".to_string(),
            status: AssignmentStatus::Created,
        });
        assert!(!created.conflict);
    }
}
