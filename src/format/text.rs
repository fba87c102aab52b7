//! Status line text for each mode.
//!
//! Exclusive mode stays terse: one line per table and a closing summary.
//! Concurrent-safe mode also narrates the connection, since that is the
//! step most likely to fail while another process holds the file.

use std::path::Path;

use crate::config::ExportMode;
use crate::export::{ExportSummary, Progress};

/// Line printed before anything touches the database.
#[must_use]
pub fn start_line(source: &Path, mode: ExportMode) -> Option<String> {
    match mode {
        ExportMode::Exclusive => Some(format!("Exporting {}", source.display())),
        ExportMode::ConcurrentSafe => None,
    }
}

/// Line for a pipeline milestone, if `mode` reports it.
#[must_use]
pub fn progress_line(event: &Progress<'_>, mode: ExportMode) -> Option<String> {
    match (*event, mode) {
        (Progress::Connecting { source }, ExportMode::ConcurrentSafe) => Some(format!(
            "Attempting to connect to {} (read-only)...",
            source.display()
        )),
        (Progress::Connected, ExportMode::ConcurrentSafe) => {
            Some("Connected. Fetching tables...".to_string())
        }
        (Progress::Connecting { .. } | Progress::Connected, ExportMode::Exclusive) => None,
        (Progress::Reading { table }, _) => Some(format!("Extracting {table}...")),
    }
}

/// Closing line for a successful run.
#[must_use]
pub fn success_line(summary: &ExportSummary) -> String {
    let count = summary.table_count();
    let noun = if count == 1 { "table" } else { "tables" };
    match summary.mode {
        ExportMode::Exclusive => format!(
            "Successfully extracted {count} {noun} to {}",
            summary.output.display()
        ),
        ExportMode::ConcurrentSafe => format!(
            "DONE! Saved {count} {noun} to {}",
            summary.output.display()
        ),
    }
}

/// Diagnostic line describing the source file that was exported.
#[must_use]
pub fn source_line(summary: &ExportSummary) -> String {
    let source = summary.source.display();
    match &summary.stats {
        Some(stats) => format!("Source {source} ({})", stats.describe()),
        None => format!("Source {source}"),
    }
}

/// Exclusive mode's message for a missing source database.
#[must_use]
pub fn missing_database_line(source: &Path) -> String {
    format!("Database not found at {}", source.display())
}

/// Concurrent-safe mode's message for any failure.
#[must_use]
pub fn failure_line(err: &dyn std::fmt::Display) -> String {
    format!("FAILED: {err}")
}
