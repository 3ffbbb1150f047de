//! JSON-file record store, one document per year.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;
use thiserror::Error;

use crate::models::{now_iso, YearRecord};


/// Naming convention for per-year record files.
const RECORD_PREFIX: &str = "subscription_data_";
const RECORD_SUFFIX: &str = ".json";


/// Failure to persist state. Reads never fail; they substitute defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write record {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}


/// File-backed store of year records.
///
/// Mutations go through [`RecordStore::with_year`], which holds a
/// per-year lock across the whole load→mutate→save cycle so two callers
/// in one process cannot drop each other's update. Separate processes
/// pointed at the same directory still race; the last writer wins.
pub struct RecordStore {
    data_dir: PathBuf,
    year_locks: Mutex<HashMap<i32, Arc<Mutex<()>>>>,
}


impl RecordStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::CreateDir {
            path: data_dir.clone(),
            source,
        })?;

        Ok(Self {
            data_dir,
            year_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the record file for a year.
    pub fn record_path(&self, year: i32) -> PathBuf {
        self.data_dir
            .join(format!("{RECORD_PREFIX}{year}{RECORD_SUFFIX}"))
    }

    /// Load a year's record.
    ///
    /// A missing file yields a fresh default record; unreadable or
    /// unparseable content is logged and also yields the default. The
    /// caller never sees a failure here.
    pub fn load(&self, year: i32) -> YearRecord {
        let path = self.record_path(year);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return YearRecord::new(year);
            }
            Err(e) => {
                warn!("unreadable record {}: {e}; using defaults", path.display());
                return YearRecord::new(year);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("corrupt record {}: {e}; using defaults", path.display());
                YearRecord::new(year)
            }
        }
    }

    /// Persist a year's record, stamping `updated_at`.
    ///
    /// The document is written to a temp file in the same directory and
    /// renamed over the target, so a concurrent reader never observes a
    /// half-written file.
    pub fn save(&self, year: i32, record: &mut YearRecord) -> Result<(), StoreError> {
        record.updated_at = now_iso();
        let json = serde_json::to_string_pretty(record)?;

        let path = self.record_path(year);
        let tmp = self.data_dir.join(format!("{RECORD_PREFIX}{year}{RECORD_SUFFIX}.tmp"));

        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Persist { path, source });
        }

        debug!("saved record {}", path.display());
        Ok(())
    }

    /// Years with a backing record file, sorted ascending.
    ///
    /// Derived from the file naming convention; entries with a malformed
    /// year component are ignored.
    pub fn list_years(&self) -> Vec<i32> {
        let mut years = Vec::new();

        let Ok(entries) = fs::read_dir(&self.data_dir) else {
            return years;
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name
                .strip_prefix(RECORD_PREFIX)
                .and_then(|rest| rest.strip_suffix(RECORD_SUFFIX))
            else {
                continue;
            };

            if let Ok(year) = stem.parse::<i32>() {
                years.push(year);
            }
        }

        years.sort_unstable();
        years
    }

    pub fn year_exists(&self, year: i32) -> bool {
        self.record_path(year).exists()
    }

    /// Materialize and persist a record for `year`.
    ///
    /// Loads whatever exists (the default when nothing does) and writes
    /// it back. Checking for an existing year first is the caller's job;
    /// this operation does not refuse to overwrite.
    pub fn create_year(&self, year: i32) -> Result<YearRecord, StoreError> {
        let lock = self.year_lock(year);
        let _guard = lock.lock();

        let mut record = self.load(year);
        self.save(year, &mut record)?;
        Ok(record)
    }

    /// Overwrite a year's record wholesale under its write lock.
    pub fn replace(&self, year: i32, record: &mut YearRecord) -> Result<(), StoreError> {
        let lock = self.year_lock(year);
        let _guard = lock.lock();
        self.save(year, record)
    }

    /// One load→mutate→save transaction against a year.
    pub fn with_year<T>(
        &self,
        year: i32,
        mutate: impl FnOnce(&mut YearRecord) -> T,
    ) -> Result<T, StoreError> {
        let lock = self.year_lock(year);
        let _guard = lock.lock();

        let mut record = self.load(year);
        let out = mutate(&mut record);
        self.save(year, &mut record)?;
        Ok(out)
    }

    /// Variant of [`RecordStore::with_year`] that skips the save when the
    /// closure declines to mutate (returns `None`).
    pub fn with_year_opt<T>(
        &self,
        year: i32,
        mutate: impl FnOnce(&mut YearRecord) -> Option<T>,
    ) -> Result<Option<T>, StoreError> {
        let lock = self.year_lock(year);
        let _guard = lock.lock();

        let mut record = self.load(year);
        match mutate(&mut record) {
            Some(out) => {
                self.save(year, &mut record)?;
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }

    fn year_lock(&self, year: i32) -> Arc<Mutex<()>> {
        self.year_locks.lock().entry(year).or_default().clone()
    }
}
