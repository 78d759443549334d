//! In-process record storage.

use super::{RecordSet, RecordStore};
use crate::error::{Error, Result};
use crate::record::MaintenanceRecord;

/// Record store that keeps everything in a vector. Nothing survives the
/// process; intended for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<MaintenanceRecord>,
    fail_next_append: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `records`, oldest first.
    #[must_use]
    pub fn with_records(records: Vec<MaintenanceRecord>) -> Self {
        Self {
            records,
            fail_next_append: false,
        }
    }

    /// Make the next append fail with a persistence error.
    pub fn fail_next_append(&mut self) {
        self.fail_next_append = true;
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<RecordSet> {
        Ok(RecordSet::from_records(self.records.clone()))
    }

    fn append(&mut self, record: &MaintenanceRecord) -> Result<()> {
        if std::mem::take(&mut self.fail_next_append) {
            let err = std::io::Error::other("simulated write failure");
            return Err(Error::persist_failed(self.location(), Error::Io(err)));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
