//! Read-only lookups over the record table.

use std::collections::HashSet;

use super::generator::CustomerIdGenerator;
use super::record::CustomerRecord;

/// Optional scoping filters for name searches. `None` means "any".
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchScope<'a> {
    /// Restrict to this region label.
    pub region: Option<&'a str>,
    /// Restrict to this category label.
    pub category: Option<&'a str>,
    /// Restrict to this company name.
    pub company_name: Option<&'a str>,
}

impl SearchScope<'_> {
    fn admits(&self, record: &CustomerRecord) -> bool {
        self.region.map_or(true, |r| record.region == r)
            && self.category.map_or(true, |c| record.category == c)
            && self.company_name.map_or(true, |c| record.company_name == c)
    }
}

impl CustomerIdGenerator<'_> {
    /// All rows whose company name equals `company_name`, optionally
    /// narrowed to one branch-handling label.
    #[must_use]
    pub fn query_by_company_name(
        &self,
        company_name: &str,
        branch_handling: Option<&str>,
    ) -> Vec<CustomerRecord> {
        let branch_handling = branch_handling.filter(|h| !h.is_empty());
        self.table
            .records()
            .iter()
            .filter(|r| r.company_name == company_name)
            .filter(|r| branch_handling.map_or(true, |h| r.branch_handling.as_deref() == Some(h)))
            .cloned()
            .collect()
    }

    /// Distinct company names containing `keyword`, case-insensitively.
    #[must_use]
    pub fn search_company_name(&self, keyword: &str, scope: SearchScope<'_>) -> Vec<String> {
        distinct_matches(
            self.table.records().iter().filter(|r| scope.admits(r)).map(|r| r.company_name.as_str()),
            keyword,
        )
    }

    /// Distinct branch names containing `keyword`, case-insensitively.
    #[must_use]
    pub fn search_branch_name(&self, keyword: &str, scope: SearchScope<'_>) -> Vec<String> {
        distinct_matches(
            self.table
                .records()
                .iter()
                .filter(|r| scope.admits(r))
                .filter_map(|r| r.branch_name.as_deref()),
            keyword,
        )
    }

    /// Distinct customer IDs containing `keyword`.
    #[must_use]
    pub fn search_customer_ids(&self, keyword: &str) -> Vec<String> {
        distinct_matches(self.table.records().iter().map(|r| r.customer_id.as_str()), keyword)
    }
}

/// Values containing `keyword` (case-insensitive), de-duplicated in first-seen order.
fn distinct_matches<'r>(values: impl Iterator<Item = &'r str>, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    let mut seen = HashSet::new();
    values
        .filter(|v| v.to_lowercase().contains(&needle))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
