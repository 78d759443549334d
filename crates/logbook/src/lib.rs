//! `logbook` - A single-user vehicle maintenance log
//!
//! Service events are appended to a record store. On every render the whole
//! log is loaded, checked for parts that are due by distance or overdue by
//! date, and shown with the history most recent first.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod alerts;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod history;
pub mod logging;
pub mod record;
pub mod render;
pub mod session;
pub mod store;

pub use alerts::{AlertNotice, AlertReport, EARLY_WARNING_MARGIN};
pub use config::Config;
pub use dashboard::{Dashboard, Metrics};
pub use error::{Error, Result};
pub use form::EntryForm;
pub use history::HistoryRow;
pub use logging::init_logging;
pub use record::{MaintenanceRecord, Reason};
pub use session::{Event, Logbook, Outcome};
pub use store::{CsvStore, MemoryStore, RecordSet, RecordStore, SqliteStore};
