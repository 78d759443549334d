//! The entry form for new maintenance records.

use chrono::NaiveDate;
use tracing::debug;

use crate::record::{MaintenanceRecord, Reason};

/// One submission's worth of input.
///
/// [`EntryForm::new`] fills in the defaults: service date and date threshold
/// are `today`, odometer and distance threshold are 0, reason is
/// [`Reason::Preventive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    part_or_service: String,
    location: String,
    service_date: NaiveDate,
    odometer: u32,
    reason: Reason,
    next_change_odometer: u32,
    next_change_date: Option<NaiveDate>,
}

impl EntryForm {
    /// Start a form for `part_or_service` with defaults for `today`.
    #[must_use]
    pub fn new(part_or_service: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            part_or_service: part_or_service.into(),
            location: String::new(),
            service_date: today,
            odometer: 0,
            reason: Reason::default(),
            next_change_odometer: 0,
            next_change_date: Some(today),
        }
    }

    /// Where the work was done.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// When the work was done.
    #[must_use]
    pub fn service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = date;
        self
    }

    /// Current odometer reading.
    #[must_use]
    pub fn odometer(mut self, odometer: u32) -> Self {
        self.odometer = odometer;
        self
    }

    /// Why the work was done.
    #[must_use]
    pub fn reason(mut self, reason: Reason) -> Self {
        self.reason = reason;
        self
    }

    /// Odometer reading at which to redo this; 0 for none.
    #[must_use]
    pub fn next_change_odometer(mut self, odometer: u32) -> Self {
        self.next_change_odometer = odometer;
        self
    }

    /// Date by which to redo this.
    #[must_use]
    pub fn next_change_date(mut self, date: NaiveDate) -> Self {
        self.next_change_date = Some(date);
        self
    }

    /// Remove the date threshold.
    #[must_use]
    pub fn clear_next_change_date(mut self) -> Self {
        self.next_change_date = None;
        self
    }

    /// Build the record, trimming the text fields.
    ///
    /// An empty part or service name is accepted.
    #[must_use]
    pub fn into_record(self) -> MaintenanceRecord {
        let part_or_service = self.part_or_service.trim().to_string();
        if part_or_service.is_empty() {
            debug!("Accepting record with empty part/service name");
        }
        MaintenanceRecord {
            part_or_service,
            location: self.location.trim().to_string(),
            service_date: self.service_date,
            odometer: self.odometer,
            reason: self.reason,
            next_change_odometer: self.next_change_odometer,
            next_change_date: self.next_change_date,
        }
    }
}
