//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::form::EntryForm;
use crate::record::{parse_date, Reason};

/// Arguments for recording a service event.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// The part replaced or service performed
    pub part: String,

    /// Where the work was done
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Service date, YYYY-MM-DD [default: today]
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Current odometer reading
    #[arg(short, long, default_value_t = 0)]
    pub odometer: u32,

    /// Why the work was done
    #[arg(short, long, value_enum, default_value = "preventive")]
    pub reason: ReasonArg,

    /// Odometer reading at which to redo this (0 for no distance alert)
    #[arg(long, default_value_t = 0)]
    pub next_odometer: u32,

    /// Date by which to redo this, YYYY-MM-DD [default: today]
    #[arg(long, value_parser = parse_date_arg, conflicts_with = "no_next_date")]
    pub next_date: Option<NaiveDate>,

    /// Do not set a date-based alert
    #[arg(long)]
    pub no_next_date: bool,

    /// Output format for the dashboard printed afterwards
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl AddCommand {
    /// Turn the arguments into an entry form, defaulting dates to `today`.
    #[must_use]
    pub fn to_form(&self, today: NaiveDate) -> EntryForm {
        let mut form = EntryForm::new(self.part.clone(), today)
            .location(self.location.clone())
            .service_date(self.date.unwrap_or(today))
            .odometer(self.odometer)
            .reason(self.reason.into())
            .next_change_odometer(self.next_odometer)
            .next_change_date(self.next_date.unwrap_or(today));
        if self.no_next_date {
            form = form.clear_next_change_date();
        }
        form
    }
}

/// Arguments shared by the read-only views.
#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Maintenance reason argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReasonArg {
    /// Scheduled maintenance
    Preventive,
    /// Repair of a fault
    Corrective,
    /// Appearance only
    Cosmetic,
    /// Improvement over the stock part
    Upgrade,
}

impl From<ReasonArg> for Reason {
    fn from(arg: ReasonArg) -> Self {
        match arg {
            ReasonArg::Preventive => Self::Preventive,
            ReasonArg::Corrective => Self::Corrective,
            ReasonArg::Cosmetic => Self::Cosmetic,
            ReasonArg::Upgrade => Self::Upgrade,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::date;

    fn add(part: &str) -> AddCommand {
        AddCommand {
            part: part.to_string(),
            location: String::new(),
            date: None,
            odometer: 0,
            reason: ReasonArg::Preventive,
            next_odometer: 0,
            next_date: None,
            no_next_date: false,
            format: OutputFormat::Plain,
        }
    }

    #[test]
    fn test_reason_arg_conversion() {
        assert_eq!(Reason::from(ReasonArg::Preventive), Reason::Preventive);
        assert_eq!(Reason::from(ReasonArg::Corrective), Reason::Corrective);
        assert_eq!(Reason::from(ReasonArg::Cosmetic), Reason::Cosmetic);
        assert_eq!(Reason::from(ReasonArg::Upgrade), Reason::Upgrade);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_to_form_defaults() {
        let today = date(2024, 6, 15);
        let record = add("Oil").to_form(today).into_record();
        assert_eq!(record.service_date, today);
        assert_eq!(record.next_change_date, Some(today));
        assert_eq!(record.next_change_odometer, 0);
    }

    #[test]
    fn test_to_form_no_next_date() {
        let mut cmd = add("Wax");
        cmd.no_next_date = true;
        let record = cmd.to_form(date(2024, 6, 15)).into_record();
        assert_eq!(record.next_change_date, None);
    }

    #[test]
    fn test_to_form_explicit_values() {
        let mut cmd = add("Brake pads");
        cmd.location = "Garage".to_string();
        cmd.date = Some(date(2024, 6, 1));
        cmd.odometer = 42_000;
        cmd.reason = ReasonArg::Corrective;
        cmd.next_odometer = 72_000;
        cmd.next_date = Some(date(2026, 6, 1));

        let record = cmd.to_form(date(2024, 6, 15)).into_record();
        assert_eq!(record.location, "Garage");
        assert_eq!(record.service_date, date(2024, 6, 1));
        assert_eq!(record.odometer, 42_000);
        assert_eq!(record.reason, Reason::Corrective);
        assert_eq!(record.next_change_odometer, 72_000);
        assert_eq!(record.next_change_date, Some(date(2026, 6, 1)));
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("2024-02-29"), Ok(date(2024, 2, 29)));
        assert!(parse_date_arg("29/02/2024").is_err());
    }
}
