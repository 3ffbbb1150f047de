//! Storage layer: per-year JSON records and whole-store backups.

mod backup;
mod store;

#[allow(unused_imports)]
pub use backup::{export_backup, restore_backup, RestoreError, RestoreReport};
#[allow(unused_imports)]
pub use store::{RecordStore, StoreError};
