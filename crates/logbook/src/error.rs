//! Error types for logbook.
//!
//! This module defines all error types used throughout the logbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for logbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Reading or writing the flat record file failed.
    #[error("record file error: {0}")]
    Csv(#[from] csv::Error),

    /// The record file exists but is not laid out as a logbook.
    #[error("unrecognised record file {path}: {message}")]
    StoreFormat {
        /// Path to the offending file.
        path: PathBuf,
        /// Description of the mismatch.
        message: String,
    },

    /// A record could not be written to the store.
    #[error("failed to save record to {location}: {source}")]
    PersistFailed {
        /// Where the store lives.
        location: String,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// A maintenance reason was not one of the known values.
    #[error("unknown maintenance reason '{0}' (expected preventive, corrective, cosmetic or upgrade)")]
    InvalidReason(String),

    /// A calendar date could not be parsed.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for logbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Wrap a store error as a failed append against `location`.
    #[must_use]
    pub fn persist_failed(location: impl Into<String>, source: Error) -> Self {
        Self::PersistFailed {
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Check if this error came from reading or writing the record store.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::Csv(_)
                | Self::StoreFormat { .. }
                | Self::PersistFailed { .. }
                | Self::Io(_)
                | Self::DirectoryCreate { .. }
        )
    }
}
