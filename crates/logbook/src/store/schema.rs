//! `SQLite` schema definitions for logbook.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the records table.
///
/// Dates are stored as `YYYY-MM-DD` text; `next_change_date` is NULL when
/// the record has no date threshold.
pub const CREATE_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    part_or_service TEXT NOT NULL,
    location TEXT NOT NULL,
    service_date TEXT NOT NULL,
    odometer INTEGER NOT NULL,
    reason TEXT NOT NULL,
    next_change_odometer INTEGER NOT NULL DEFAULT 0,
    next_change_date TEXT
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_RECORDS_TABLE, CREATE_METADATA_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_records_table_contains_required_columns() {
        for column in [
            "id INTEGER PRIMARY KEY",
            "part_or_service TEXT NOT NULL",
            "service_date TEXT NOT NULL",
            "odometer INTEGER NOT NULL",
            "reason TEXT NOT NULL",
            "next_change_odometer INTEGER NOT NULL",
            "next_change_date TEXT",
        ] {
            assert!(CREATE_RECORDS_TABLE.contains(column), "missing {column}");
        }
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
