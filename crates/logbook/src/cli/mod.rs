//! Command-line interface for logbook.
//!
//! This module provides the CLI structure for the `logbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, OutputFormat, ReasonArg, ViewCommand};

/// logbook - Keep track of your vehicle's maintenance
///
/// Records service events and warns when a part is due by distance or
/// overdue by date.
#[derive(Debug, Parser)]
#[command(name = "logbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a service event, then show the dashboard
    Add(AddCommand),

    /// Show metrics, alerts and history
    Show(ViewCommand),

    /// Show maintenance alerts only
    Alerts(ViewCommand),

    /// Show the service history only
    History(ViewCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use crate::store::test_support::date;
    use clap::CommandFactory;

    fn show() -> Command {
        Command::Show(ViewCommand {
            format: OutputFormat::Plain,
        })
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "logbook");
    }

    #[test]
    fn test_verbosity_levels() {
        let mut cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: show(),
        };
        assert_eq!(cli.verbosity(), Verbosity::Normal);
        cli.verbose = 1;
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        cli.verbose = 3;
        assert_eq!(cli.verbosity(), Verbosity::Trace);
        cli.quiet = true;
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_add_minimal() {
        let cli = Cli::try_parse_from(["logbook", "add", "Oil change"]).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.part, "Oil change");
        assert_eq!(add.odometer, 0);
        assert_eq!(add.next_odometer, 0);
        assert_eq!(add.reason, ReasonArg::Preventive);
        assert!(add.date.is_none());
        assert!(!add.no_next_date);
    }

    #[test]
    fn test_parse_add_full() {
        let cli = Cli::try_parse_from([
            "logbook",
            "add",
            "Oil Filter",
            "--location",
            "Corner Garage",
            "--date",
            "2024-03-01",
            "--odometer",
            "9600",
            "--reason",
            "corrective",
            "--next-odometer",
            "10000",
            "--next-date",
            "2099-01-01",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.location, "Corner Garage");
        assert_eq!(add.date, Some(date(2024, 3, 1)));
        assert_eq!(add.odometer, 9600);
        assert_eq!(add.reason, ReasonArg::Corrective);
        assert_eq!(add.next_odometer, 10_000);
        assert_eq!(add.next_date, Some(date(2099, 1, 1)));
        assert_eq!(add.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_add_rejects_bad_date() {
        let result = Cli::try_parse_from(["logbook", "add", "Oil", "--date", "01/03/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_rejects_negative_odometer() {
        let result = Cli::try_parse_from(["logbook", "add", "Oil", "--odometer", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_next_date_conflicts() {
        let result = Cli::try_parse_from([
            "logbook",
            "add",
            "Oil",
            "--next-date",
            "2025-01-01",
            "--no-next-date",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_views() {
        let cli = Cli::try_parse_from(["logbook", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
        let cli = Cli::try_parse_from(["logbook", "alerts", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Alerts(ViewCommand {
                format: OutputFormat::Json
            })
        ));
        let cli = Cli::try_parse_from(["logbook", "history"]).unwrap();
        assert!(matches!(cli.command, Command::History(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["logbook", "-c", "/custom/config.toml", "show"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["logbook", "config", "validate", "--file", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
