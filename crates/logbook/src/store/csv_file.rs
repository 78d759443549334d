//! Flat delimited-file storage.
//!
//! The whole record set lives in one CSV file with a fixed header row. Every
//! append rewrites the file through a temporary sibling and an atomic rename.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, StringRecord};
use tracing::{debug, info, warn};

use super::{LoadWarning, RecordSet, RecordStore};
use crate::error::{Error, Result};
use crate::record::{format_date, parse_date, MaintenanceRecord, Reason};

/// Column names, in file order.
pub const CSV_HEADER: [&str; 7] = [
    "part_or_service",
    "location",
    "service_date",
    "odometer",
    "reason",
    "next_change_odometer",
    "next_change_date",
];

/// Record store backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store for the file at `path`. Nothing is touched until the
    /// first load or append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw data rows, or `None` if the file does not exist yet.
    fn read_rows(&self) -> Result<Option<Vec<ByteRecord>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No record file at {}, starting empty", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.byte_headers()?.clone();
        if headers.is_empty() {
            return Ok(Some(Vec::new()));
        }
        self.check_header(&headers)?;

        let rows = reader
            .byte_records()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Some(rows))
    }

    fn check_header(&self, headers: &ByteRecord) -> Result<()> {
        let found: Vec<String> = headers
            .iter()
            .map(|field| String::from_utf8_lossy(field).trim().to_string())
            .collect();
        if found.iter().map(String::as_str).eq(CSV_HEADER) {
            Ok(())
        } else {
            Err(Error::StoreFormat {
                path: self.path.clone(),
                message: format!(
                    "expected header '{}', found '{}'",
                    CSV_HEADER.join(","),
                    found.join(",")
                ),
            })
        }
    }

    fn rewrite_with(&self, record: &MaintenanceRecord) -> Result<()> {
        let existing = self.read_rows()?.unwrap_or_default();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp = self.temp_path();
        let result = Self::write_file(&tmp, &existing, record)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(Error::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result?;
        self.sync_parent()?;

        debug!(
            "Rewrote {} with {} rows",
            self.path.display(),
            existing.len() + 1
        );
        Ok(())
    }

    fn write_file(path: &Path, existing: &[ByteRecord], record: &MaintenanceRecord) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(file);

        writer.write_record(CSV_HEADER)?;
        for row in existing {
            writer.write_byte_record(row)?;
        }
        writer.write_record(to_row(record))?;

        let file = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        file.sync_all()?;
        Ok(())
    }

    /// Flush the directory entry so the rename itself survives a crash.
    #[cfg(unix)]
    fn sync_parent(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        File::open(parent)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    #[allow(clippy::unused_self, clippy::unnecessary_wraps)]
    fn sync_parent(&self) -> Result<()> {
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "records".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<RecordSet> {
        let Some(rows) = self.read_rows()? else {
            return Ok(RecordSet::default());
        };

        let mut set = RecordSet::default();
        for raw in rows {
            let line = raw.position().map_or(0, csv::Position::line);
            match StringRecord::from_byte_record(raw)
                .map_err(|e| format!("invalid UTF-8: {}", e.utf8_error()))
                .and_then(|row| parse_row(&row))
            {
                Ok(record) => set.records.push(record),
                Err(message) => {
                    warn!(
                        "Skipping malformed row at {}:{}: {}",
                        self.path.display(),
                        line,
                        message
                    );
                    set.warnings.push(LoadWarning { line, message });
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
        self.rewrite_with(record)
            .map_err(|e| Error::persist_failed(self.location(), e))?;
        info!(
            "Recorded '{}' at {} in {}",
            record.part_or_service,
            record.odometer,
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn to_row(record: &MaintenanceRecord) -> [String; 7] {
    [
        record.part_or_service.clone(),
        record.location.clone(),
        format_date(record.service_date),
        record.odometer.to_string(),
        record.reason.to_string(),
        record.next_change_odometer.to_string(),
        record.next_change_date.map(format_date).unwrap_or_default(),
    ]
}

fn parse_row(row: &StringRecord) -> std::result::Result<MaintenanceRecord, String> {
    if row.len() != CSV_HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            CSV_HEADER.len(),
            row.len()
        ));
    }

    let next_change_date = match row[6].trim() {
        "" => None,
        value => Some(parse_date(value).map_err(|e| e.to_string())?),
    };

    Ok(MaintenanceRecord {
        part_or_service: row[0].to_string(),
        location: row[1].to_string(),
        service_date: parse_date(&row[2]).map_err(|e| e.to_string())?,
        odometer: parse_distance("odometer", &row[3])?,
        reason: row[4].parse::<Reason>().map_err(|e| e.to_string())?,
        next_change_odometer: parse_distance("next_change_odometer", &row[5])?,
        next_change_date,
    })
}

fn parse_distance(column: &str, value: &str) -> std::result::Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {column} '{value}'"))
}
