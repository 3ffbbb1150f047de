//! Whole-store backup export and restore.

use std::collections::BTreeMap;

use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::models::{now_iso, BackupBundle, YearRecord};
use crate::storage::store::{RecordStore, StoreError};


/// Why a restore was rejected. None of these are fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("Invalid JSON format")]
    InvalidEncoding,

    #[error("Invalid backup format: missing 'years' key")]
    InvalidFormat,

    #[error("No valid year data found in backup")]
    EmptyBackup,
}


/// Outcome of a successful restore.
#[derive(Debug)]
pub struct RestoreReport {
    pub restored_years: Vec<i32>,
}


impl RestoreReport {
    /// Short human-readable summary naming count and years.
    pub fn message(&self) -> String {
        let years: Vec<String> = self.restored_years.iter().map(|y| y.to_string()).collect();
        format!(
            "Successfully restored {} year(s): {}",
            self.restored_years.len(),
            years.join(", ")
        )
    }
}


/// Serialize every known year's full record into one backup document.
pub fn export_backup(store: &RecordStore) -> Result<String, StoreError> {
    let mut years = BTreeMap::new();
    for year in store.list_years() {
        years.insert(year.to_string(), store.load(year));
    }

    let bundle = BackupBundle {
        backup_timestamp: now_iso(),
        years,
    };

    Ok(serde_json::to_string_pretty(&bundle)?)
}


/// Restore a full backup, overwriting each embedded year's record.
///
/// Entries whose key is not a year or whose value is not a well-formed
/// record are skipped, not fatal. There is no cross-year atomicity:
/// years written before a later failure stay written.
pub fn restore_backup(
    store: &RecordStore,
    bundle_bytes: &[u8],
) -> Result<RestoreReport, RestoreError> {
    let text = std::str::from_utf8(bundle_bytes).map_err(|_| RestoreError::InvalidEncoding)?;
    let bundle: Value = serde_json::from_str(text).map_err(|_| RestoreError::InvalidEncoding)?;

    let years = bundle
        .get("years")
        .ok_or(RestoreError::InvalidFormat)?
        .as_object()
        .ok_or(RestoreError::InvalidFormat)?;

    let mut restored_years = Vec::new();
    for (key, embedded) in years {
        let Ok(year) = key.parse::<i32>() else {
            warn!("skipping backup entry with non-year key {key:?}");
            continue;
        };

        let mut record: YearRecord = match serde_json::from_value(embedded.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed backup entry for {year}: {e}");
                continue;
            }
        };

        if let Err(e) = store.replace(year, &mut record) {
            warn!("failed to restore {year}: {e}");
            continue;
        }
        restored_years.push(year);
    }

    if restored_years.is_empty() {
        return Err(RestoreError::EmptyBackup);
    }

    Ok(RestoreReport { restored_years })
}
