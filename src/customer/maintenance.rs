//! Record corrections, deletion and bulk import/export.

use tracing::info;

use super::error::{CustomerIdError, CustomerIdResult};
use super::generator::CustomerIdGenerator;
use super::record::non_empty;
use super::table::RecordTable;

impl CustomerIdGenerator<'_> {
    /// Overwrites the company and/or branch name of the rows carrying
    /// `customer_id`, then persists the table. Blank replacements are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerIdError::NotFound`] if no row carries the ID.
    pub async fn update_info(
        &mut self,
        customer_id: &str,
        new_company_name: Option<&str>,
        new_branch_name: Option<&str>,
    ) -> CustomerIdResult<()> {
        if self.table.find_by_id(customer_id).is_none() {
            return Err(CustomerIdError::NotFound { customer_id: customer_id.to_string() });
        }

        let company = non_empty(new_company_name.map(str::to_string));
        let branch = non_empty(new_branch_name.map(str::to_string));

        for row in self.table.rows_with_id_mut(customer_id) {
            if let Some(company) = &company {
                row.company_name.clone_from(company);
            }
            if let Some(branch) = &branch {
                row.branch_name = Some(branch.clone());
            }
        }

        self.store.save(&self.table).await;
        info!(
            customer_id,
            new_company_name = company.as_deref().unwrap_or(""),
            new_branch_name = branch.as_deref().unwrap_or(""),
            "updated customer info"
        );
        Ok(())
    }

    /// Deletes the rows carrying `customer_id` and persists the table.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerIdError::NotFound`] if no row carries the ID.
    pub async fn delete(&mut self, customer_id: &str) -> CustomerIdResult<()> {
        if self.table.remove_id(customer_id) == 0 {
            return Err(CustomerIdError::NotFound { customer_id: customer_id.to_string() });
        }
        self.store.save(&self.table).await;
        info!(customer_id, "deleted customer ID");
        Ok(())
    }

    /// Merges a CSV table file into the table, keeping the first row per ID,
    /// and persists the result. Returns the number of rows gained.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerIdError::TableFormat`] if the file cannot be parsed;
    /// the table is left untouched.
    pub async fn import(&mut self, file: &[u8]) -> CustomerIdResult<usize> {
        let incoming = RecordTable::from_csv(file)?;
        let offered = incoming.len();
        let added = self.table.merge(incoming);
        self.store.save(&self.table).await;
        info!(offered, added, "imported table file");
        Ok(added)
    }

    /// The whole table as a CSV table file.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerIdError::TableFormat`] if serialization fails.
    pub fn export(&self) -> CustomerIdResult<Vec<u8>> {
        Ok(self.table.to_csv()?)
    }
}
