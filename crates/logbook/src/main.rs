//! `logbook` - CLI for the vehicle maintenance log
//!
//! Each invocation is one render cycle: load the log, apply the submission
//! if there is one, then print the requested view.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;

use logbook::cli::{AddCommand, Cli, Command, ConfigCommand, OutputFormat, ViewCommand};
use logbook::config::DisplayConfig;
use logbook::{init_logging, render, store, Config, Dashboard, Event, Logbook, RecordStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Add(add_cmd) => handle_add(&config, &add_cmd, today),
        Command::Show(view) => handle_view(&config, &view, today, View::Dashboard),
        Command::Alerts(view) => handle_view(&config, &view, today, View::Alerts),
        Command::History(view) => handle_view(&config, &view, today, View::History),
    }
}

#[derive(Debug, Clone, Copy)]
enum View {
    Dashboard,
    Alerts,
    History,
}

fn open_logbook(config: &Config) -> anyhow::Result<Logbook<Box<dyn RecordStore>>> {
    let store = store::open(config)
        .with_context(|| format!("opening record store at {}", config.storage_path().display()))?;
    Ok(Logbook::new(store))
}

fn handle_add(config: &Config, cmd: &AddCommand, today: NaiveDate) -> anyhow::Result<()> {
    let mut logbook = open_logbook(config)?;
    let outcome = logbook
        .handle(Event::Submit(cmd.to_form(today)), today)
        .context("recording maintenance")?;

    if outcome.committed {
        eprintln!(
            "Recorded '{}' in {}.",
            cmd.part.trim(),
            logbook.store().location()
        );
    }
    print_view(&outcome.dashboard, &config.display, cmd.format, View::Dashboard)
}

fn handle_view(
    config: &Config,
    cmd: &ViewCommand,
    today: NaiveDate,
    view: View,
) -> anyhow::Result<()> {
    let mut logbook = open_logbook(config)?;
    let outcome = logbook
        .handle(Event::Render, today)
        .context("loading maintenance records")?;
    print_view(&outcome.dashboard, &config.display, cmd.format, view)
}

fn print_view(
    dashboard: &Dashboard,
    display: &DisplayConfig,
    format: OutputFormat,
    view: View,
) -> anyhow::Result<()> {
    let text = match (format, view) {
        (OutputFormat::Plain, View::Dashboard) => render::plain(dashboard, display),
        (OutputFormat::Plain, View::Alerts) => render::alerts(&dashboard.alerts, display),
        (OutputFormat::Plain, View::History) => render::history(&dashboard.history, display),
        (OutputFormat::Json, View::Dashboard) => render::json(dashboard)? + "\n",
        (OutputFormat::Json, View::Alerts) => render::json(&dashboard.alerts)? + "\n",
        (OutputFormat::Json, View::History) => render::json(&dashboard.history)? + "\n",
    };
    print!("{text}");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Backend:            {}", config.storage.backend);
                println!("  Path:               {}", config.storage_path().display());
                println!();
                println!("[Display]");
                println!("  Distance unit:      {}", config.display.distance_unit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
