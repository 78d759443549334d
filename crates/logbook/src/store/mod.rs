//! Record storage for logbook.
//!
//! The rest of the crate only talks to the [`RecordStore`] trait. Three
//! backends implement it:
//!
//! - [`CsvStore`]: a flat delimited file with a header row (the default).
//! - [`SqliteStore`]: a `SQLite` database.
//! - [`MemoryStore`]: an in-process vector, for tests.

mod csv_file;
mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{Config, StorageBackend};
use crate::error::Result;
use crate::record::MaintenanceRecord;

pub use csv_file::{CsvStore, CSV_HEADER};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A row that was skipped while loading because it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    /// Where the row lives (file line number or database row id).
    pub line: u64,
    /// Why the row was rejected.
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} skipped: {}", self.line, self.message)
    }
}

/// Everything a store produced on load: the parsed records in insertion
/// order, plus any rows it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Successfully parsed records, oldest first.
    pub records: Vec<MaintenanceRecord>,
    /// Rows that were skipped.
    pub warnings: Vec<LoadWarning>,
}

impl RecordSet {
    /// Build a set with no warnings.
    #[must_use]
    pub fn from_records(records: Vec<MaintenanceRecord>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    /// Whether no records were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Persistent, append-only storage of maintenance records.
pub trait RecordStore: fmt::Debug {
    /// Load every record, oldest first.
    ///
    /// A store with no backing data yet yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data exists but cannot be read.
    /// Individual malformed rows are reported in [`RecordSet::warnings`]
    /// instead.
    fn load(&self) -> Result<RecordSet>;

    /// Durably add a record to the end of the store.
    ///
    /// The record is committed only if this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write fails.
    fn append(&mut self, record: &MaintenanceRecord) -> Result<()>;

    /// Human-readable description of where records are kept.
    fn location(&self) -> String;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn load(&self) -> Result<RecordSet> {
        (**self).load()
    }

    fn append(&mut self, record: &MaintenanceRecord) -> Result<()> {
        (**self).append(record)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the `SQLite` database cannot be opened. The flat-file
/// store is opened lazily and never fails here.
pub fn open(config: &Config) -> Result<Box<dyn RecordStore>> {
    let path = config.storage_path();
    debug!(
        "Opening {} store at {}",
        config.storage.backend,
        path.display()
    );
    let store: Box<dyn RecordStore> = match config.storage.backend {
        StorageBackend::Csv => Box::new(CsvStore::new(path)),
        StorageBackend::Sqlite => Box::new(SqliteStore::open(path)?),
    };
    Ok(store)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::record::{MaintenanceRecord, Reason};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    pub fn record(part: &str, service_date: NaiveDate, odometer: u32) -> MaintenanceRecord {
        MaintenanceRecord {
            part_or_service: part.to_string(),
            location: "Corner Garage".to_string(),
            service_date,
            odometer,
            reason: Reason::Preventive,
            next_change_odometer: 0,
            next_change_date: None,
        }
    }
}
