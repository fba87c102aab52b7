//! Database-to-JSON export.
//!
//! This module handles:
//! - Assembling the export document (table name -> rows)
//! - Running the full pipeline against a source database
//! - Encoding and atomically writing the result
//!
//! Both CLI modes share [`export_database`]; they differ only in the
//! [`ExportConfig`] they pass in.

mod writer;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{ExportConfig, ExportMode};
use crate::error::Result;
use crate::storage::{self, Row, SourceDb, SourceStats};

pub use writer::{serialize, write_document};

/// Every exported table's rows, keyed by table name in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExportDocument(Map<String, Value>);

impl ExportDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Empty tables are kept as empty arrays.
    pub fn insert_table(&mut self, name: String, rows: Vec<Row>) {
        let rows = rows.into_iter().map(Value::Object).collect();
        self.0.insert(name, Value::Array(rows));
    }
}

/// Pipeline milestones, reported as they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    Connecting { source: &'a Path },
    Connected,
    Reading { table: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub source: PathBuf,
    pub output: PathBuf,
    pub mode: ExportMode,
    pub stats: Option<SourceStats>,
    pub tables: Vec<TableSummary>,
    pub bytes_written: usize,
}

impl ExportSummary {
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Export every user table of `config.source` to `config.output`.
///
/// All tables are read inside one read transaction, so the document reflects
/// a single database state even if another process commits mid-export. The
/// connection is closed on every path: explicitly on success, by drop on any
/// error. The source file is only ever read.
///
/// # Errors
///
/// Returns `NotFound`, `Open`, `Query`, `Close`, `Serialize`, or `Write`
/// depending on which stage failed. No output file is left behind on failure.
pub fn export_database<F>(config: &ExportConfig, mut on_progress: F) -> Result<ExportSummary>
where
    F: FnMut(Progress<'_>),
{
    let source = storage::locate(&config.source)?;
    let stats = SourceStats::read(&source);

    on_progress(Progress::Connecting { source: &source });
    let db = SourceDb::open(&source, config.mode)?;
    on_progress(Progress::Connected);

    db.begin_snapshot()?;
    let tables = db.list_tables(&config.reserved_prefix)?;
    let mut document = ExportDocument::new();
    let mut summaries = Vec::with_capacity(tables.len());
    for table in tables {
        on_progress(Progress::Reading { table: &table });
        let rows = db.read_table(&table)?;
        summaries.push(TableSummary {
            name: table.clone(),
            rows: rows.len(),
        });
        document.insert_table(table, rows);
    }
    db.close()?;

    let bytes = serialize(&document)?;
    write_document(&bytes, &config.output)?;

    let summary = ExportSummary {
        source,
        output: config.output.clone(),
        mode: config.mode,
        stats,
        tables: summaries,
        bytes_written: bytes.len(),
    };
    tracing::info!(
        tables = summary.table_count(),
        rows = summary.row_count(),
        bytes = summary.bytes_written,
        output = %summary.output.display(),
        "Export complete"
    );
    Ok(summary)
}
