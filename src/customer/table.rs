//! The in-memory record table and its CSV file codec.

use std::collections::HashSet;

use super::record::CustomerRecord;

/// Canonical column set of the table file, in order.
pub const COLUMNS: [&str; 7] = [
    "Region",
    "Category",
    "CompanyName",
    "ExtraRegionCode",
    "BranchName",
    "BranchHandling",
    "CustomerID",
];

/// All assigned records, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    records: Vec<CustomerRecord>,
}

impl RecordTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from existing records.
    #[must_use]
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        Self { records }
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a row without any uniqueness check.
    pub fn push(&mut self, record: CustomerRecord) {
        self.records.push(record);
    }

    /// First row carrying `customer_id`.
    #[must_use]
    pub fn find_by_id(&self, customer_id: &str) -> Option<&CustomerRecord> {
        self.records.iter().find(|r| r.customer_id == customer_id)
    }

    /// Mutable access to every row carrying `customer_id`.
    pub fn rows_with_id_mut<'a>(
        &'a mut self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a mut CustomerRecord> + 'a {
        self.records.iter_mut().filter(move |r| r.customer_id == customer_id)
    }

    /// Removes every row carrying `customer_id`, returning how many were removed.
    pub fn remove_id(&mut self, customer_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.customer_id != customer_id);
        before - self.records.len()
    }

    /// Appends `incoming` and keeps only the first row per customer ID.
    ///
    /// Returns the number of rows gained.
    pub fn merge(&mut self, incoming: RecordTable) -> usize {
        let before = self.records.len();
        let mut seen = HashSet::new();
        let mut merged = std::mem::take(&mut self.records);
        merged.extend(incoming.records);
        merged.retain(|r| seen.insert(r.customer_id.clone()));
        self.records = merged;
        self.records.len().saturating_sub(before)
    }

    /// Parses a CSV table file. Missing optional columns load as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`csv::Error`] if the bytes are not a readable table.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);
        let records = reader
            .deserialize::<CustomerRecord>()
            .map(|row| row.map(CustomerRecord::normalized))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Serializes the table to CSV with the canonical header row, even when empty.
    ///
    /// # Errors
    ///
    /// Returns a [`csv::Error`] if serialization fails.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(COLUMNS)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
    }
}
