//! Data model for year ledgers and backups.

mod month;
mod year_record;

#[allow(unused_imports)]
pub use month::{Month, MonthParseError};
#[allow(unused_imports)]
pub use year_record::{
    now_iso,
    BackupBundle,
    HistoryAction,
    HistoryEntry,
    MonthFlags,
    Settings,
    YearRecord,
};
