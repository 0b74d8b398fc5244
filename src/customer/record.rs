//! Record and attribute types for assigned customer IDs.

use serde::{Deserialize, Serialize};

/// The classification attributes a customer ID is derived from.
///
/// Optional attributes are normalized so that an empty string and an
/// absent value compare equal. Deserialized values are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AttributesBody")]
pub struct CustomerAttributes {
    /// Region label (e.g. `"1北投"`).
    pub region: String,
    /// Category label (e.g. `"0連鎖或相關企業的合開發票"`).
    pub category: String,
    /// Company name, free text.
    pub company_name: String,
    /// Extra-region label (e.g. `"1本縣市"`).
    pub extra_region_code: Option<String>,
    /// Branch name, when the entity is a branch.
    pub branch_name: Option<String>,
    /// Branch-handling label (e.g. `"00開立發票客編"`).
    pub branch_handling: Option<String>,
}

/// Wire shape of [`CustomerAttributes`] before normalization.
#[derive(Deserialize)]
struct AttributesBody {
    region: String,
    category: String,
    company_name: String,
    #[serde(default)]
    extra_region_code: Option<String>,
    #[serde(default)]
    branch_name: Option<String>,
    #[serde(default)]
    branch_handling: Option<String>,
}

impl From<AttributesBody> for CustomerAttributes {
    fn from(body: AttributesBody) -> Self {
        Self {
            region: body.region,
            category: body.category,
            company_name: body.company_name,
            extra_region_code: body.extra_region_code,
            branch_name: body.branch_name,
            branch_handling: body.branch_handling,
        }
        .normalized()
    }
}

impl CustomerAttributes {
    /// Creates attributes for a head office with no optional fields set.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        category: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
            company_name: company_name.into(),
            ..Self::default()
        }
    }

    /// Sets the extra-region label.
    #[must_use]
    pub fn with_extra_region(mut self, code: impl Into<String>) -> Self {
        self.extra_region_code = non_empty(Some(code.into()));
        self
    }

    /// Sets the branch name.
    #[must_use]
    pub fn with_branch(mut self, name: impl Into<String>) -> Self {
        self.branch_name = non_empty(Some(name.into()));
        self
    }

    /// Sets the branch-handling label.
    #[must_use]
    pub fn with_branch_handling(mut self, handling: impl Into<String>) -> Self {
        self.branch_handling = non_empty(Some(handling.into()));
        self
    }

    /// Collapses empty optional strings into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            extra_region_code: non_empty(self.extra_region_code),
            branch_name: non_empty(self.branch_name),
            branch_handling: non_empty(self.branch_handling),
            ..self
        }
    }
}

/// One row of the record table.
///
/// Field names serialize to the canonical column headers of the table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Region label.
    #[serde(rename = "Region", default)]
    pub region: String,
    /// Category label.
    #[serde(rename = "Category", default)]
    pub category: String,
    /// Company name.
    #[serde(rename = "CompanyName", default)]
    pub company_name: String,
    /// Extra-region label.
    #[serde(rename = "ExtraRegionCode", default)]
    pub extra_region_code: Option<String>,
    /// Branch name.
    #[serde(rename = "BranchName", default)]
    pub branch_name: Option<String>,
    /// Branch-handling label.
    #[serde(rename = "BranchHandling", default)]
    pub branch_handling: Option<String>,
    /// The assigned identifier.
    #[serde(rename = "CustomerID", default)]
    pub customer_id: String,
}

impl CustomerRecord {
    /// Builds a record for a freshly assigned ID.
    #[must_use]
    pub fn assigned(attrs: &CustomerAttributes, customer_id: impl Into<String>) -> Self {
        Self {
            region: attrs.region.clone(),
            category: attrs.category.clone(),
            company_name: attrs.company_name.clone(),
            extra_region_code: attrs.extra_region_code.clone(),
            branch_name: attrs.branch_name.clone(),
            branch_handling: attrs.branch_handling.clone(),
            customer_id: customer_id.into(),
        }
    }

    /// True when every discriminating attribute equals `attrs`.
    #[must_use]
    pub fn matches(&self, attrs: &CustomerAttributes) -> bool {
        self.is_same_company(attrs)
            && self.branch_name == attrs.branch_name
            && self.branch_handling == attrs.branch_handling
    }

    /// True when the record belongs to the same company scope:
    /// region, category, company name and extra-region code.
    #[must_use]
    pub fn is_same_company(&self, attrs: &CustomerAttributes) -> bool {
        self.is_in_serial_pool(attrs) && self.company_name == attrs.company_name
    }

    /// True when the record shares the company-serial numbering pool:
    /// region, category and extra-region code, ignoring the company name.
    #[must_use]
    pub fn is_in_serial_pool(&self, attrs: &CustomerAttributes) -> bool {
        self.region == attrs.region
            && self.category == attrs.category
            && self.extra_region_code == attrs.extra_region_code
    }

    /// Collapses empty optional cells into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            extra_region_code: non_empty(self.extra_region_code),
            branch_name: non_empty(self.branch_name),
            branch_handling: non_empty(self.branch_handling),
            customer_id: self.customer_id.trim().to_string(),
            ..self
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
