//! Ledger operations over stored year records.

mod operations;

#[allow(unused_imports)]
pub use operations::{validate_member_name, Ledger, LedgerError};
