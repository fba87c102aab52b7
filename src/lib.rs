//! `sqlite_extract` - Snapshot a SQLite database to JSON
//!
//! Reads every user table of an application database and writes the rows
//! to a single, indented JSON document for inspection, backup, or migration.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap, shared by both binaries
//! - [`config`] - Export modes, fixed paths, and failure policy
//! - [`storage`] - `SQLite` connection, catalog, and table scans
//! - [`export`] - Document assembly, JSON encoding, atomic write
//! - [`error`] - Error types and handling
//! - [`format`] - Operator-facing status lines
//! - [`logging`] - `tracing` subscriber setup
//!
//! # Modes
//!
//! - `db-extract` opens the database normally and writes `prisma/data_dump.json`.
//! - `db-extract-safe` opens it read-only without waiting on locks and writes
//!   `prisma_full_data.json`; it never exits with an error.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod storage;

pub use config::{ExportConfig, ExportMode};
pub use error::{ExportError, Result};
pub use export::{ExportDocument, ExportSummary, export_database};

/// Run the CLI application in `mode`.
///
/// This is the main entry point called from each binary's `main()`.
///
/// # Errors
///
/// Returns an error if the export fails under a propagating failure policy.
pub fn run(mode: ExportMode) -> anyhow::Result<()> {
    cli::run(mode)
}
