//! Export formats for year ledgers.

mod csv;

#[allow(unused_imports)]
pub use csv::{format_currency, year_to_csv};
