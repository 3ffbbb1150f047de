//! Export command - CSV payment table.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::export::year_to_csv;
use crate::storage::RecordStore;


/// Export a year's payment table as CSV, to a file or stdout.
pub fn csv(store: &RecordStore, year: i32, output: Option<PathBuf>) -> Result<()> {
    let record = store.load(year);
    let csv = year_to_csv(&record);

    match output {
        Some(path) => {
            fs::write(&path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("\x1b[32m+ Exported to: {}\x1b[0m", path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
