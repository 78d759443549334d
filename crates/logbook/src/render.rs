//! Text and JSON rendering of the dashboard.

use std::fmt::Write as _;

use serde::Serialize;

use crate::alerts::{AlertNotice, AlertReport};
use crate::config::DisplayConfig;
use crate::dashboard::{Dashboard, Metrics};
use crate::error::Result;
use crate::history::HistoryRow;
use crate::record::format_date;

/// Shown instead of everything else when the log is empty.
pub const NO_RECORDS_MESSAGE: &str = "No records found. Start by adding one with `logbook add`.";

/// Shown in the alerts panel when no record has crossed a threshold.
pub const NOTHING_PENDING_MESSAGE: &str = "No critical maintenance pending.";

const HISTORY_HEADERS: [&str; 8] = [
    "#",
    "Date",
    "Part/Service",
    "Location",
    "Odometer",
    "Reason",
    "Next at",
    "Next by",
];

/// Columns that hold numbers and are right-aligned.
const NUMERIC_COLUMNS: [usize; 3] = [0, 4, 6];

/// Render the full dashboard as plain text.
#[must_use]
pub fn plain(dashboard: &Dashboard, display: &DisplayConfig) -> String {
    let mut out = String::new();
    for warning in &dashboard.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }

    let Some(metrics) = &dashboard.metrics else {
        out.push_str(NO_RECORDS_MESSAGE);
        out.push('\n');
        return out;
    };

    out.push_str(&metrics_line(metrics, display));
    out.push_str("\n\nMaintenance alerts\n");
    out.push_str(&alerts(&dashboard.alerts, display));
    out.push_str("\nService history\n");
    out.push_str(&history(&dashboard.history, display));
    out
}

/// Render the summary metrics on one line.
#[must_use]
pub fn metrics_line(metrics: &Metrics, display: &DisplayConfig) -> String {
    format!(
        "Last odometer: {} {}  |  Records: {}  |  Status: {}",
        metrics.last_odometer, display.distance_unit, metrics.total_records, metrics.status
    )
}

/// Render the alerts panel, one notice per line.
#[must_use]
pub fn alerts(report: &AlertReport, display: &DisplayConfig) -> String {
    match report {
        AlertReport::NoRecords => format!("{NO_RECORDS_MESSAGE}\n"),
        AlertReport::NothingPending => format!("{NOTHING_PENDING_MESSAGE}\n"),
        AlertReport::Pending(notices) => notices
            .iter()
            .map(|notice| notice_line(notice, display) + "\n")
            .collect(),
    }
}

fn notice_line(notice: &AlertNotice, display: &DisplayConfig) -> String {
    match notice {
        AlertNotice::DueSoon { part, threshold } => format!(
            "DUE SOON  {part} (planned at {threshold} {})",
            display.distance_unit
        ),
        AlertNotice::Overdue { part, due } => {
            format!("OVERDUE   {part} (due {})", format_date(*due))
        }
    }
}

/// Render the history as an aligned table.
#[must_use]
pub fn history(rows: &[HistoryRow], display: &DisplayConfig) -> String {
    if rows.is_empty() {
        return format!("{NO_RECORDS_MESSAGE}\n");
    }

    let cells: Vec<[String; 8]> = rows.iter().map(|row| history_cells(row, display)).collect();

    let mut widths = HISTORY_HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_table_row(&mut out, &HISTORY_HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &cells {
        push_table_row(&mut out, row, &widths);
    }
    out
}

fn history_cells(row: &HistoryRow, display: &DisplayConfig) -> [String; 8] {
    let record = &row.record;
    let unit = &display.distance_unit;
    [
        row.entry.to_string(),
        format_date(record.service_date),
        record.part_or_service.clone(),
        record.location.clone(),
        format!("{} {unit}", record.odometer),
        record.reason.to_string(),
        if record.has_distance_threshold() {
            format!("{} {unit}", record.next_change_odometer)
        } else {
            "-".to_string()
        },
        record
            .next_change_date
            .map_or_else(|| "-".to_string(), format_date),
    ]
}

fn push_table_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if NUMERIC_COLUMNS.contains(&i) {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Render any dashboard part as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
