//! Maintenance alert evaluation.
//!
//! Every record is checked against two independent rules on every render:
//!
//! - **Distance**: the record has a non-zero `next_change_odometer` and the
//!   highest odometer reading in the log is within [`EARLY_WARNING_MARGIN`]
//!   of it (or past it).
//! - **Date**: the record has a `next_change_date` that is today or earlier.
//!
//! The distance rule warns early; the date rule only fires once the date has
//! arrived. Alerts are never acknowledged, so a record past its threshold
//! alerts on every render.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::record::MaintenanceRecord;

/// Distance before `next_change_odometer` at which a distance alert starts.
pub const EARLY_WARNING_MARGIN: u32 = 500;

/// A single alert raised by a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertNotice {
    /// The odometer is at or near the record's distance threshold.
    DueSoon {
        /// Part or service name of the record.
        part: String,
        /// The record's `next_change_odometer`.
        threshold: u32,
    },
    /// The record's date threshold has been reached.
    Overdue {
        /// Part or service name of the record.
        part: String,
        /// The record's `next_change_date`.
        due: NaiveDate,
    },
}

impl AlertNotice {
    /// Part or service name the notice refers to.
    #[must_use]
    pub fn part(&self) -> &str {
        match self {
            Self::DueSoon { part, .. } | Self::Overdue { part, .. } => part,
        }
    }

    /// Whether this is a distance notice.
    #[must_use]
    pub fn is_due_soon(&self) -> bool {
        matches!(self, Self::DueSoon { .. })
    }

    /// Whether this is a date notice.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue { .. })
    }
}

/// Result of evaluating the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "notices", rename_all = "snake_case")]
pub enum AlertReport {
    /// The log is empty; nothing was evaluated.
    NoRecords,
    /// Records exist but none raised an alert.
    NothingPending,
    /// One or more alerts, in record order.
    Pending(Vec<AlertNotice>),
}

impl AlertReport {
    /// The raised notices (empty unless [`AlertReport::Pending`]).
    #[must_use]
    pub fn notices(&self) -> &[AlertNotice] {
        match self {
            Self::Pending(notices) => notices,
            Self::NoRecords | Self::NothingPending => &[],
        }
    }
}

/// Highest odometer reading across `records`, or `None` if there are none.
#[must_use]
pub fn max_odometer(records: &[MaintenanceRecord]) -> Option<u32> {
    records.iter().map(|r| r.odometer).max()
}

/// Whether `record` raises a distance alert given the log's highest reading.
#[must_use]
pub fn distance_due(record: &MaintenanceRecord, max_odometer: u32) -> bool {
    record.has_distance_threshold()
        && max_odometer >= record.next_change_odometer.saturating_sub(EARLY_WARNING_MARGIN)
}

/// Whether `record` raises a date alert on `today`.
#[must_use]
pub fn date_due(record: &MaintenanceRecord, today: NaiveDate) -> bool {
    record.next_change_date.is_some_and(|due| due <= today)
}

/// Evaluate every record in `records` as of `today`.
#[must_use]
pub fn evaluate(records: &[MaintenanceRecord], today: NaiveDate) -> AlertReport {
    let Some(max_odometer) = max_odometer(records) else {
        return AlertReport::NoRecords;
    };

    let mut notices = Vec::new();
    for record in records {
        if distance_due(record, max_odometer) {
            notices.push(AlertNotice::DueSoon {
                part: record.part_or_service.clone(),
                threshold: record.next_change_odometer,
            });
        }
        if let Some(due) = record.next_change_date.filter(|_| date_due(record, today)) {
            notices.push(AlertNotice::Overdue {
                part: record.part_or_service.clone(),
                due,
            });
        }
    }

    debug!(
        "Evaluated {} records at odometer {}: {} notices",
        records.len(),
        max_odometer,
        notices.len()
    );

    if notices.is_empty() {
        AlertReport::NothingPending
    } else {
        AlertReport::Pending(notices)
    }
}
