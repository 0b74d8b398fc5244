//! Customer ID assignment: lookup tables, the record table and the generator.

pub mod codes;
pub mod error;
pub mod generator;
mod maintenance;
pub mod record;
pub mod search;
pub mod table;

pub use codes::{CodeBook, CodeEntry, CodeLayout};
pub use error::{CustomerIdError, CustomerIdResult, ValidationError};
pub use generator::{Assignment, AssignmentStatus, CustomerIdGenerator};
pub use record::{CustomerAttributes, CustomerRecord};
pub use search::SearchScope;
pub use table::RecordTable;
