//! Backup subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::auth::AuthorizedCaller;
use crate::storage::{export_backup, restore_backup, RecordStore};


/// Export every year's record as one JSON bundle.
pub fn export(store: &RecordStore, output: Option<PathBuf>) -> Result<()> {
    let years = store.list_years();
    if years.is_empty() {
        println!("\x1b[33mNothing to back up: no ledger data found\x1b[0m");
        return Ok(());
    }

    let bundle = export_backup(store)?;

    match output {
        Some(path) => {
            fs::write(&path, bundle)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "\x1b[32m+ Backed up {} year(s) to: {}\x1b[0m",
                years.len(),
                path.display()
            );
        }
        None => println!("{bundle}"),
    }

    Ok(())
}


/// Restore a backup bundle, overwriting existing year records.
pub fn restore(caller: &AuthorizedCaller, path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let store = caller.ledger().store();

    match restore_backup(store, &bytes) {
        Ok(report) => {
            println!("\x1b[32m+ {}\x1b[0m", report.message());
        }
        Err(e) => {
            println!("\x1b[31mRestore failed: {e}\x1b[0m");
        }
    }

    Ok(())
}
