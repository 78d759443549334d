//! One render pass over the log: metrics, alerts and history.

use chrono::NaiveDate;
use serde::Serialize;

use crate::alerts::{self, AlertReport};
use crate::history::{self, HistoryRow};
use crate::store::{LoadWarning, RecordSet};

/// Status label shown alongside the metrics.
pub const STATUS_ON_TRACK: &str = "On track";

/// Summary figures for a non-empty log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Highest odometer reading recorded.
    pub last_odometer: u32,
    /// Number of records in the log.
    pub total_records: usize,
    /// Overall status label.
    pub status: String,
}

/// Everything shown on one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Summary figures, absent when the log is empty.
    pub metrics: Option<Metrics>,
    /// The alerts panel.
    pub alerts: AlertReport,
    /// All records, most recent service first.
    pub history: Vec<HistoryRow>,
    /// Rows the store could not read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LoadWarning>,
}

impl Dashboard {
    /// Build the dashboard for `set` as of `today`.
    #[must_use]
    pub fn build(set: RecordSet, today: NaiveDate) -> Self {
        let RecordSet { records, warnings } = set;
        let metrics = alerts::max_odometer(&records).map(|last_odometer| Metrics {
            last_odometer,
            total_records: records.len(),
            status: STATUS_ON_TRACK.to_string(),
        });

        Self {
            metrics,
            alerts: alerts::evaluate(&records, today),
            history: history::sorted(&records),
            warnings,
        }
    }

    /// Whether the log has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_none()
    }
}
