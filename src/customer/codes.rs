//! Fixed lookup tables mapping classification labels to ID digits.
//!
//! The category table has one configurable entry, resolved once at startup
//! from [`crate::config::AppConfig::daching_relationship`].

use serde::Serialize;

use super::error::ValidationError;
use super::record::CustomerAttributes;

/// Branch-handling label that forces the head-office layout for
/// consolidated-invoice chains.
pub const INVOICE_SEQUENCE: &str = "00開立發票客編";

/// Branch-handling label that gives each branch its own serial.
pub const BRANCH_SEQUENCE: &str = "01分店客編";

/// Category digit of consolidated-invoice chains.
pub const CONSOLIDATED_INVOICE: char = '0';

const REGIONS: [(&str, char); 3] = [("1北投", '1'), ("2台南", '2'), ("3高雄", '3')];

const EXTRA_REGIONS: [(&str, char); 10] = [
    ("0無區分", '0'),
    ("1本縣市", '1'),
    ("2本縣市", '2'),
    ("3本縣市", '3'),
    ("4本縣市", '4'),
    ("5外縣市", '5'),
    ("6外縣市", '6'),
    ("7外縣市", '7'),
    ("8外縣市", '8'),
    ("9外縣市", '9'),
];

const DEFAULT_REGION: char = '0';
const CATCH_ALL_CATEGORY: char = '9';
const DEFAULT_EXTRA_REGION: char = '0';

/// A selectable label and the digit it contributes to an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    /// Label as shown to users and stored in the table.
    pub label: String,
    /// Digit written into the customer ID.
    pub digit: char,
}

impl CodeEntry {
    fn new(label: impl Into<String>, digit: char) -> Self {
        Self { label: label.into(), digit }
    }
}

/// How the trailing part of an ID is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLayout {
    /// `R C SSS E 00`: branch slot pinned to `00`.
    HeadOffice,
    /// `R C SSS E BB`: per-company branch serial.
    Branch,
    /// `R C SSSSSS`: six-digit serial, no extra-region or branch digits.
    Standalone,
}

impl CodeLayout {
    /// Width of the company serial for this layout.
    #[must_use]
    pub fn serial_width(self) -> usize {
        match self {
            Self::HeadOffice | Self::Branch => 3,
            Self::Standalone => 6,
        }
    }
}

/// The full set of lookup tables used to compose and validate IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    regions: Vec<CodeEntry>,
    categories: Vec<CodeEntry>,
    extra_regions: Vec<CodeEntry>,
    branch_handlings: Vec<CodeEntry>,
}

impl CodeBook {
    /// Builds the code book with the configured "daching relationship"
    /// category label (stored as `8<label>`).
    #[must_use]
    pub fn new(daching_relationship: &str) -> Self {
        let categories = vec![
            CodeEntry::new("0連鎖或相關企業的合開發票", '0'),
            CodeEntry::new("1連鎖或相關企業的不合開發票", '1'),
            CodeEntry::new("2單一客戶", '2'),
            CodeEntry::new("6機動", '6'),
            CodeEntry::new("7未定", '7'),
            CodeEntry::new(format!("8{daching_relationship}"), '8'),
            CodeEntry::new("9其他", '9'),
        ];

        Self {
            regions: REGIONS.iter().map(|(l, d)| CodeEntry::new(*l, *d)).collect(),
            categories,
            extra_regions: EXTRA_REGIONS.iter().map(|(l, d)| CodeEntry::new(*l, *d)).collect(),
            branch_handlings: vec![
                CodeEntry::new(INVOICE_SEQUENCE, '0'),
                CodeEntry::new(BRANCH_SEQUENCE, '1'),
            ],
        }
    }

    /// Region options.
    #[must_use]
    pub fn regions(&self) -> &[CodeEntry] {
        &self.regions
    }

    /// Category options, including the configured entry.
    #[must_use]
    pub fn categories(&self) -> &[CodeEntry] {
        &self.categories
    }

    /// Extra-region options.
    #[must_use]
    pub fn extra_regions(&self) -> &[CodeEntry] {
        &self.extra_regions
    }

    /// Branch-handling options.
    #[must_use]
    pub fn branch_handlings(&self) -> &[CodeEntry] {
        &self.branch_handlings
    }

    /// Region digit, `0` when the label is unknown.
    #[must_use]
    pub fn region_digit(&self, label: &str) -> char {
        lookup(&self.regions, label).unwrap_or(DEFAULT_REGION)
    }

    /// Category digit, the catch-all `9` when the label is unknown.
    #[must_use]
    pub fn category_digit(&self, label: &str) -> char {
        lookup(&self.categories, label).unwrap_or(CATCH_ALL_CATEGORY)
    }

    /// Extra-region digit, `0` when absent or unknown.
    #[must_use]
    pub fn extra_region_digit(&self, label: Option<&str>) -> char {
        label.and_then(|l| lookup(&self.extra_regions, l)).unwrap_or(DEFAULT_EXTRA_REGION)
    }

    /// Picks the layout for a category digit and branch-handling label.
    #[must_use]
    pub fn layout(category_digit: char, branch_handling: Option<&str>) -> CodeLayout {
        match category_digit {
            CONSOLIDATED_INVOICE if branch_handling == Some(INVOICE_SEQUENCE) => {
                CodeLayout::HeadOffice
            }
            '0' | '1' | '8' => CodeLayout::Branch,
            _ => CodeLayout::Standalone,
        }
    }

    /// Rejects attributes whose labels are not in the tables.
    ///
    /// This is the boundary check; the generator itself never fails on
    /// unknown labels.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, attrs: &CustomerAttributes) -> Result<(), ValidationError> {
        if lookup(&self.regions, &attrs.region).is_none() {
            return Err(ValidationError::Region(attrs.region.clone()));
        }
        if lookup(&self.categories, &attrs.category).is_none() {
            return Err(ValidationError::Category(attrs.category.clone()));
        }
        if attrs.company_name.trim().is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }
        if let Some(code) = &attrs.extra_region_code {
            if lookup(&self.extra_regions, code).is_none() {
                return Err(ValidationError::ExtraRegionCode(code.clone()));
            }
        }
        if let Some(handling) = &attrs.branch_handling {
            if lookup(&self.branch_handlings, handling).is_none() {
                return Err(ValidationError::BranchHandling(handling.clone()));
            }
        }
        Ok(())
    }
}

fn lookup(entries: &[CodeEntry], label: &str) -> Option<char> {
    entries.iter().find(|e| e.label == label).map(|e| e.digit)
}
