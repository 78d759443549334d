//! Core record types for logbook.
//!
//! A [`MaintenanceRecord`] is one logged service event. Records are immutable
//! once created and are only ever appended to a store.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Calendar date format used for storage and command-line input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a service was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Reason {
    /// Scheduled maintenance.
    #[default]
    Preventive,
    /// Repair of a fault.
    Corrective,
    /// Appearance only.
    Cosmetic,
    /// Improvement over the stock part.
    Upgrade,
}

impl Reason {
    /// All reasons, in display order.
    pub const ALL: [Reason; 4] = [
        Self::Preventive,
        Self::Corrective,
        Self::Cosmetic,
        Self::Upgrade,
    ];

    /// The stored text form of this reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "Preventive",
            Self::Corrective => "Corrective",
            Self::Cosmetic => "Cosmetic",
            Self::Upgrade => "Upgrade",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidReason(s.to_string()))
    }
}

/// A single logged service event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// The part replaced or the service performed.
    pub part_or_service: String,

    /// Where the work was done.
    pub location: String,

    /// When the work was done.
    pub service_date: NaiveDate,

    /// Odometer reading at the time of service.
    pub odometer: u32,

    /// Why the work was done.
    pub reason: Reason,

    /// Odometer reading at which this should be redone. Zero disables the
    /// distance alert.
    pub next_change_odometer: u32,

    /// Date by which this should be redone, if any.
    pub next_change_date: Option<NaiveDate>,
}

impl MaintenanceRecord {
    /// Whether this record carries a distance threshold.
    #[must_use]
    pub fn has_distance_threshold(&self) -> bool {
        self.next_change_odometer > 0
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the text is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| Error::invalid_date(value))
}

/// Format a date the way it is stored.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
