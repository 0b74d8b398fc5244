//! Customer ID composition and assignment.
//!
//! An ID is built from fixed-width digit fields:
//!
//! ```text
//! HeadOffice  R C SSS E 00
//! Branch      R C SSS E BB
//! Standalone  R C SSSSSS
//! ```
//!
//! `R` region, `C` category, `S` company serial, `E` extra region, `B`
//! branch serial. Serials are the running maximum of their scope plus one.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::codes::{CodeBook, CodeLayout};
use super::record::{CustomerAttributes, CustomerRecord};
use super::table::RecordTable;
use crate::store::TableStore;

/// Offset of the company serial within an ID (after region and category).
const SERIAL_OFFSET: usize = 2;
/// Width of the trailing branch serial.
const BRANCH_WIDTH: usize = 2;

/// What `generate` did with the computed ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// A new row was appended and the table persisted.
    Created,
    /// A row with identical attributes already held the ID; nothing written.
    Existing,
    /// A row with different attributes already holds the ID; nothing written.
    Conflict,
}

/// The outcome of [`CustomerIdGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// The assigned (or pre-existing) ID.
    pub customer_id: String,
    /// What happened to the table.
    pub status: AssignmentStatus,
}

/// Assigns customer IDs against an in-memory copy of the record table.
///
/// Mutating operations take `&mut self`, so one generator is a single
/// writer. Nothing coordinates separate processes sharing a backend: each
/// save overwrites the whole resource and the last writer wins.
pub struct CustomerIdGenerator<'a> {
    pub(crate) store: TableStore<'a>,
    pub(crate) codes: &'a CodeBook,
    pub(crate) table: RecordTable,
}

impl<'a> CustomerIdGenerator<'a> {
    /// Loads the table from `store` for writing.
    ///
    /// When the backend reports the resource missing, starts from an empty
    /// table and saves it once so that it exists afterwards. An unanswered
    /// existence check never triggers that write.
    pub async fn open(store: TableStore<'a>, codes: &'a CodeBook) -> Self {
        let table = match store.exists().await {
            Some(false) => {
                info!("record table missing, creating an empty one");
                let table = RecordTable::new();
                store.save(&table).await;
                table
            }
            Some(true) | None => store.load().await,
        };
        Self { store, codes, table }
    }

    /// Loads the table from `store` without ever writing to it.
    ///
    /// A missing resource reads as an empty table and stays missing.
    pub async fn load(store: TableStore<'a>, codes: &'a CodeBook) -> Self {
        let table = store.load().await;
        Self { store, codes, table }
    }

    /// Replaces the in-memory table with a fresh load from the store.
    pub async fn refresh(&mut self) {
        self.table = self.store.load().await;
    }

    /// The current in-memory table.
    #[must_use]
    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// The lookup tables this generator composes IDs with.
    #[must_use]
    pub fn codes(&self) -> &CodeBook {
        self.codes
    }

    /// Computes the ID `attrs` would receive, without touching the table.
    ///
    /// Returns the existing ID when a row with identical attributes exists.
    #[must_use]
    pub fn preview(&self, attrs: &CustomerAttributes) -> String {
        if let Some(existing) = self.table.records().iter().find(|r| r.matches(attrs)) {
            debug!(customer_id = %existing.customer_id, "exact attribute match");
            return existing.customer_id.clone();
        }

        let region = self.codes.region_digit(&attrs.region);
        let category = self.codes.category_digit(&attrs.category);
        let extra_region = self.codes.extra_region_digit(attrs.extra_region_code.as_deref());
        let layout = CodeBook::layout(category, attrs.branch_handling.as_deref());
        let serial = self.company_serial(attrs, layout.serial_width());

        match layout {
            CodeLayout::HeadOffice => format!("{region}{category}{serial}{extra_region}00"),
            CodeLayout::Branch => {
                let branch = self.branch_serial(attrs);
                format!("{region}{category}{serial}{extra_region}{branch}")
            }
            CodeLayout::Standalone => format!("{region}{category}{serial}"),
        }
    }

    /// Computes the ID for `attrs` and records it if it is new.
    ///
    /// The whole table is persisted after an append. A collision with a row
    /// holding different attributes is logged and reported as
    /// [`AssignmentStatus::Conflict`]; the ID is still returned.
    pub async fn generate(&mut self, attrs: &CustomerAttributes) -> Assignment {
        let customer_id = self.preview(attrs);

        if let Some(existing) = self.table.find_by_id(&customer_id) {
            let status = if existing.matches(attrs) {
                AssignmentStatus::Existing
            } else {
                warn!(
                    %customer_id,
                    held_by = %existing.company_name,
                    requested_by = %attrs.company_name,
                    "customer ID already exists with different attributes, skipping insertion"
                );
                AssignmentStatus::Conflict
            };
            return Assignment { customer_id, status };
        }

        self.table.push(CustomerRecord::assigned(attrs, customer_id.clone()));
        self.store.save(&self.table).await;
        info!(%customer_id, company = %attrs.company_name, "generated customer ID");

        Assignment { customer_id, status: AssignmentStatus::Created }
    }

    /// Company serial of `width` digits.
    ///
    /// Reuses the serial of the company's first row. Otherwise takes the
    /// maximum over the (region, category, extra-region) pool, which spans
    /// every company in that pool, plus one.
    fn company_serial(&self, attrs: &CustomerAttributes, width: usize) -> String {
        let serial_range = SERIAL_OFFSET..SERIAL_OFFSET + width;

        if let Some(serial) = self
            .table
            .records()
            .iter()
            .find(|r| r.is_same_company(attrs))
            .and_then(|r| r.customer_id.get(serial_range.clone()))
        {
            return serial.to_string();
        }

        let next = self
            .table
            .records()
            .iter()
            .filter(|r| r.is_in_serial_pool(attrs))
            .filter_map(|r| r.customer_id.get(serial_range.clone())?.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        pad(next, width)
    }

    /// Branch serial: one past the highest in the company scope, or `00`/`01`
    /// for the company's first row depending on whether a branch is named.
    fn branch_serial(&self, attrs: &CustomerAttributes) -> String {
        let mut rows = self.table.records().iter().filter(|r| r.is_same_company(attrs)).peekable();

        if rows.peek().is_none() {
            let first = if attrs.branch_name.is_some() { "01" } else { "00" };
            return first.to_string();
        }

        let next = rows
            .filter_map(|r| branch_digits(&r.customer_id)?.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        pad(next, BRANCH_WIDTH)
    }
}

fn branch_digits(customer_id: &str) -> Option<&str> {
    customer_id.get(customer_id.len().checked_sub(BRANCH_WIDTH)?..)
}

fn pad(value: u64, width: usize) -> String {
    let padded = format!("{value:0width$}");
    if padded.len() > width {
        warn!(value, width, "serial overflowed its field width");
    }
    padded
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::customer::codes::INVOICE_SEQUENCE;
    use crate::ports::record_store::{RecordStore, StoreError, StoreFuture};

    const CHAIN: &str = "0連鎖或相關企業的合開發票";
    const CHAIN_SPLIT: &str = "1連鎖或相關企業的不合開發票";
    const SINGLE: &str = "2單一客戶";

    fn codes() -> CodeBook {
        CodeBook::new("達清關係企業")
    }

    /// Holds one row but cannot answer existence checks.
    #[derive(Default)]
    struct UnansweredExists {
        saves: AtomicUsize,
    }

    impl RecordStore for UnansweredExists {
        fn describe(&self) -> String {
            "unanswered".to_string()
        }

        fn exists(&self) -> StoreFuture<'_, bool> {
            Box::pin(async { Err(StoreError::backend("unanswered", "connection reset")) })
        }

        fn load(&self) -> StoreFuture<'_, RecordTable> {
            Box::pin(async {
                Ok(RecordTable::from_records(vec![CustomerRecord::assigned(
                    &CustomerAttributes::new("1北投", SINGLE, "Acme"),
                    "12000001",
                )]))
            })
        }

        fn save<'a>(&'a self, _table: &'a RecordTable) -> StoreFuture<'a, ()> {
            Box::pin(async move {
                self.saves.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn failed_existence_check_keeps_stored_rows() {
        let backend = UnansweredExists::default();
        let codes = codes();
        let gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

        assert_eq!(gen.search_customer_ids("1200"), vec!["12000001"]);
        assert_eq!(gen.table().len(), 1);
        assert_eq!(backend.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn load_leaves_missing_table_missing() {
        let backend = MemoryStore::default();
        let codes = codes();
        let gen = CustomerIdGenerator::load(TableStore::new(&backend), &codes).await;

        assert_eq!(gen.preview(&CustomerAttributes::new("1北投", SINGLE, "Acme")), "12000001");
        assert_eq!(backend.save_count(), 0);
        assert!(backend.snapshot().is_none());
    }

    #[tokio::test]
    async fn head_office_layout_pins_branch_slot() {
        let backend = MemoryStore::default();
        let codes = codes();
        let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

        let attrs = CustomerAttributes::new("1北投", CHAIN, "Acme")
            .with_extra_region("1本縣市")
            .with_branch("Taipei")
            .with_branch_handling(INVOICE_SEQUENCE);

        let assignment = gen.generate(&attrs).await;
        assert_eq!(assignment.customer_id, "10001100");
        assert_eq!(assignment.status, AssignmentStatus::Created);
    }

    #[tokio::test]
    async fn branches_share_company_serial_and_count_up() {
        let backend = MemoryStore::default();
        let codes = codes();
        let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;
        let base = CustomerAttributes::new("2台南", CHAIN_SPLIT, "Acme").with_extra_region("5外縣市");

        let first = gen.generate(&base.clone().with_branch("North")).await;
        let second = gen.generate(&base.clone().with_branch("South")).await;
        let third = gen.generate(&base.clone().with_branch("East")).await;

        assert_eq!(first.customer_id, "21001501");
        assert_eq!(second.customer_id, "21001502");
        assert_eq!(third.customer_id, "21001503");
    }

    #[tokio::test]
    async fn extra_region_scopes_serial_pool_and_company() {
        let backend = MemoryStore::default();
        let codes = codes();
        let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;
        let acme = CustomerAttributes::new("1北投", CHAIN_SPLIT, "Acme").with_branch("North");

        let home = gen.generate(&acme.clone().with_extra_region("1本縣市")).await;
        let globex = gen
            .generate(
                &CustomerAttributes::new("1北投", CHAIN_SPLIT, "Globex")
                    .with_extra_region("5外縣市")
                    .with_branch("Harbor"),
            )
            .await;
        let away = gen.generate(&acme.clone().with_extra_region("5外縣市")).await;
        let home_again = gen
            .generate(
                &CustomerAttributes::new("1北投", CHAIN_SPLIT, "Acme")
                    .with_extra_region("1本縣市")
                    .with_branch("South"),
            )
            .await;

        assert_eq!(home.customer_id, "11001101");
        assert_eq!(globex.customer_id, "11001501");
        assert_eq!(away.customer_id, "11002501");
        assert_eq!(home_again.customer_id, "11001102");
    }

    #[tokio::test]
    async fn first_row_without_branch_name_gets_00() {
        let backend = MemoryStore::default();
        let codes = codes();
        let gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

        let attrs = CustomerAttributes::new("3高雄", "8達清關係企業", "Acme");
        assert_eq!(gen.preview(&attrs), "38001000");
    }

    #[tokio::test]
    async fn standalone_serial_counts_across_companies_in_pool() {
        let backend = MemoryStore::default();
        let codes = codes();
        let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

        let acme = gen.generate(&CustomerAttributes::new("1北投", SINGLE, "Acme")).await;
        let globex = gen.generate(&CustomerAttributes::new("1北投", SINGLE, "Globex")).await;
        let other_region = gen.generate(&CustomerAttributes::new("2台南", SINGLE, "Initech")).await;

        assert_eq!(acme.customer_id, "12000001");
        assert_eq!(globex.customer_id, "12000002");
        assert_eq!(other_region.customer_id, "22000001");
    }

    #[tokio::test]
    async fn unknown_labels_fall_back_to_default_digits() {
        let backend = MemoryStore::default();
        let codes = codes();
        let gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

        let attrs = CustomerAttributes::new("unknown", "unknown", "Acme");
        assert_eq!(gen.preview(&attrs), "09000001");
    }

    #[tokio::test]
    async fn conflicting_id_is_flagged_and_not_written() {
        // An imported row sits in another region's pool but already carries
        // the ID the 1北投 pool will mint next.
        let backend = MemoryStore::with_records(vec![CustomerRecord::assigned(
            &CustomerAttributes::new("2台南", SINGLE, "Imported"),
            "12000001",
        )]);
        let codes = codes();
        let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;
        let saves_before = backend.save_count();

        let assignment = gen.generate(&CustomerAttributes::new("1北投", SINGLE, "Globex")).await;

        assert_eq!(assignment.customer_id, "12000001");
        assert_eq!(assignment.status, AssignmentStatus::Conflict);
        assert_eq!(gen.table().len(), 1);
        assert_eq!(backend.save_count(), saves_before);
    }

    #[test]
    fn branch_digits_are_the_last_two() {
        assert_eq!(branch_digits("11001107"), Some("07"));
        assert_eq!(branch_digits("7"), None);
    }

    #[test]
    fn pad_keeps_overflowing_values() {
        assert_eq!(pad(7, 3), "007");
        assert_eq!(pad(1000, 3), "1000");
    }
}
