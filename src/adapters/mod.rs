//! Record store backends.
//!
//! Each adapter persists the whole table as one resource. `memory` is for
//! tests and dry runs; the rest are selected by configuration.

pub mod cloud_drive;
pub mod local;
pub mod memory;
pub mod object_storage;
pub mod relational;

pub use cloud_drive::CloudDriveStore;
pub use local::LocalFileStore;
pub use memory::MemoryStore;
pub use object_storage::ObjectStorageStore;
pub use relational::RelationalStore;
