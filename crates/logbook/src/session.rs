//! Event handling around a record store.
//!
//! A [`Logbook`] is either displaying the current log or, for the duration
//! of [`Logbook::submit`], appending a new record. Submitting is always
//! followed by a fresh load; nothing is cached between renders.

use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::form::EntryForm;
use crate::store::RecordStore;

/// Something the user asked for.
#[derive(Debug, Clone)]
pub enum Event {
    /// Show the current log.
    Render,
    /// Record a new service event, then show the log.
    Submit(EntryForm),
}

/// What handling an event produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The dashboard, loaded after any mutation.
    pub dashboard: Dashboard,
    /// Whether a record was committed to the store.
    pub committed: bool,
}

/// A maintenance log over an injected store.
#[derive(Debug)]
pub struct Logbook<S> {
    store: S,
}

impl<S: RecordStore> Logbook<S> {
    /// Wrap `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the log and build the dashboard as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn render(&self, today: NaiveDate) -> Result<Dashboard> {
        let set = self.store.load()?;
        for warning in &set.warnings {
            warn!("{} in {}", warning, self.store.location());
        }
        Ok(Dashboard::build(set, today))
    }

    /// Append the record described by `form`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the store rejects the write; the
    /// record is then not part of the log.
    pub fn submit(&mut self, form: EntryForm) -> Result<()> {
        let _span = info_span!("submit").entered();
        let record = form.into_record();
        self.store.append(&record)?;
        info!("Committed '{}'", record.part_or_service);
        Ok(())
    }

    /// Handle one event and re-render.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission cannot be persisted or the log
    /// cannot be loaded afterwards.
    pub fn handle(&mut self, event: Event, today: NaiveDate) -> Result<Outcome> {
        let committed = match event {
            Event::Render => false,
            Event::Submit(form) => {
                self.submit(form)?;
                true
            }
        };
        Ok(Outcome {
            dashboard: self.render(today)?,
            committed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertReport;
    use crate::store::test_support::date;
    use crate::store::MemoryStore;

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn test_render_empty() {
        let logbook = Logbook::new(MemoryStore::new());
        let dashboard = logbook.render(today()).unwrap();
        assert_eq!(dashboard.alerts, AlertReport::NoRecords);
    }

    #[test]
    fn test_submit_then_render_includes_record() {
        let mut logbook = Logbook::new(MemoryStore::new());
        let outcome = logbook
            .handle(
                Event::Submit(
                    EntryForm::new("Oil", today())
                        .odometer(1000)
                        .clear_next_change_date(),
                ),
                today(),
            )
            .unwrap();

        assert!(outcome.committed);
        assert_eq!(outcome.dashboard.history.len(), 1);
        assert_eq!(outcome.dashboard.metrics.unwrap().last_odometer, 1000);
    }

    #[test]
    fn test_default_date_threshold_is_overdue_immediately() {
        let mut logbook = Logbook::new(MemoryStore::new());
        let outcome = logbook
            .handle(Event::Submit(EntryForm::new("Oil", today())), today())
            .unwrap();
        let notices = outcome.dashboard.alerts.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_overdue());
    }

    #[test]
    fn test_render_event_does_not_commit() {
        let mut logbook = Logbook::new(MemoryStore::new());
        let outcome = logbook.handle(Event::Render, today()).unwrap();
        assert!(!outcome.committed);
    }

    #[test]
    fn test_failed_submit_is_not_committed() {
        let mut store = MemoryStore::new();
        store.fail_next_append();
        let mut logbook = Logbook::new(store);

        let err = logbook
            .handle(Event::Submit(EntryForm::new("Oil", today())), today())
            .unwrap_err();
        assert!(err.is_persistence());

        let dashboard = logbook.render(today()).unwrap();
        assert!(dashboard.is_empty());
    }
}
