//! Port traits defining external boundaries.
//!
//! The record store is the only boundary between the ID generator and the
//! outside world. Implementations live in `src/adapters/`.

pub mod record_store;

pub use record_store::{RecordStore, StoreError, StoreFuture};
