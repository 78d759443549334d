//! `SQLite`-backed record storage.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use super::migrations;
use super::{LoadWarning, RecordSet, RecordStore};
use crate::error::{Error, Result};
use crate::record::{format_date, parse_date, MaintenanceRecord, Reason};

/// Record store backed by a `SQLite` database.
///
/// Insertion order is the `id` autoincrement column, so records come back
/// in the order they were appended.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

/// A row as it sits in the database, before validation.
///
/// Columns are read as dynamic values because `SQLite` only enforces the
/// declared type as an affinity; a row edited outside the app can hold any
/// storage class in any column.
struct RawRow {
    id: i64,
    part_or_service: Value,
    location: Value,
    service_date: Value,
    odometer: Value,
    reason: Value,
    next_change_odometer: Value,
    next_change_date: Value,
}

impl SqliteStore {
    /// Open or create a record database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        migrations::initialize_schema(&conn)?;

        debug!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn insert(&self, record: &MaintenanceRecord) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO records (part_or_service, location, service_date, odometer,
                                 reason, next_change_odometer, next_change_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                record.part_or_service,
                record.location,
                format_date(record.service_date),
                record.odometer,
                record.reason.as_str(),
                record.next_change_odometer,
                record.next_change_date.map(format_date),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn row_to_raw(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
        Ok(RawRow {
            id: row.get(0)?,
            part_or_service: row.get(1)?,
            location: row.get(2)?,
            service_date: row.get(3)?,
            odometer: row.get(4)?,
            reason: row.get(5)?,
            next_change_odometer: row.get(6)?,
            next_change_date: row.get(7)?,
        })
    }
}

impl RawRow {
    fn into_record(self) -> std::result::Result<MaintenanceRecord, String> {
        let next_change_date = match self.next_change_date {
            Value::Null => None,
            value => match text("next_change_date", value)?.trim() {
                "" => None,
                trimmed => Some(parse_date(trimmed).map_err(|e| e.to_string())?),
            },
        };

        Ok(MaintenanceRecord {
            part_or_service: text("part_or_service", self.part_or_service)?,
            location: text("location", self.location)?,
            service_date: parse_date(&text("service_date", self.service_date)?)
                .map_err(|e| e.to_string())?,
            odometer: reading("odometer", self.odometer)?,
            reason: text("reason", self.reason)?
                .parse::<Reason>()
                .map_err(|e| e.to_string())?,
            next_change_odometer: reading("next_change_odometer", self.next_change_odometer)?,
            next_change_date,
        })
    }
}

fn text(column: &str, value: Value) -> std::result::Result<String, String> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(format!("{column} is not text ({})", other.data_type())),
    }
}

fn reading(column: &str, value: Value) -> std::result::Result<u32, String> {
    match value {
        Value::Integer(n) => u32::try_from(n).map_err(|_| format!("invalid {column} '{n}'")),
        Value::Text(s) => Err(format!("invalid {column} '{s}'")),
        other => Err(format!("{column} is not an integer ({})", other.data_type())),
    }
}

impl RecordStore for SqliteStore {
    fn load(&self) -> Result<RecordSet> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, part_or_service, location, service_date, odometer,
                   reason, next_change_odometer, next_change_date
            FROM records ORDER BY id ASC
            ",
        )?;

        let rows = stmt
            .query_map([], Self::row_to_raw)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut set = RecordSet::default();
        for raw in rows {
            let id = raw.id;
            match raw.into_record() {
                Ok(record) => set.records.push(record),
                Err(message) => {
                    warn!("Skipping malformed record id {}: {}", id, message);
                    set.warnings.push(LoadWarning {
                        line: u64::try_from(id).unwrap_or_default(),
                        message,
                    });
                }
            }
        }

        debug!(
            "Loaded {} records ({} skipped) from {}",
            set.records.len(),
            set.warnings.len(),
            self.path.display()
        );
        Ok(set)
    }

    fn append(&mut self, record: &MaintenanceRecord) -> Result<()> {
        let id = self
            .insert(record)
            .map_err(|e| Error::persist_failed(self.location(), e))?;
        info!(
            "Recorded '{}' at {} as id {}",
            record.part_or_service, record.odometer, id
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
