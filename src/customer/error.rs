//! Error types for customer ID operations.

use thiserror::Error;

/// Result alias for customer ID operations.
pub type CustomerIdResult<T> = Result<T, CustomerIdError>;

/// An attribute value rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Region label not in the region table.
    #[error("invalid region: {0}")]
    Region(String),
    /// Category label not in the category table.
    #[error("invalid category: {0}")]
    Category(String),
    /// Extra-region label not in the extra-region table.
    #[error("invalid extra region code: {0}")]
    ExtraRegionCode(String),
    /// Branch-handling label not in the branch-handling table.
    #[error("invalid branch handling: {0}")]
    BranchHandling(String),
    /// Company name missing or blank.
    #[error("company name must not be empty")]
    EmptyCompanyName,
}

/// Errors surfaced by customer ID operations.
///
/// Storage failures never appear here: the store boundary logs them and
/// degrades to an empty table or a skipped write.
#[derive(Debug, Error)]
pub enum CustomerIdError {
    /// Attributes failed boundary validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The operation targets a customer ID that is not in the table.
    #[error("customer ID not found: {customer_id}")]
    NotFound {
        /// The missing ID.
        customer_id: String,
    },
    /// A table file could not be read or written.
    #[error("invalid table file: {0}")]
    TableFormat(#[from] csv::Error),
}

impl CustomerIdError {
    /// HTTP-equivalent status for the error: 404 for missing IDs, 400 otherwise.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::TableFormat(_) => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = CustomerIdError::NotFound { customer_id: "10001100".to_string() };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "customer ID not found: 10001100");
    }

    #[test]
    fn validation_maps_to_400() {
        let err = CustomerIdError::from(ValidationError::Region("x".to_string()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "invalid region: x");
    }
}
