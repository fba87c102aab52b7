//! `SQLite` access layer for `sqlite_extract`.
//!
//! Opens the source database in one of two ways depending on
//! [`ExportMode`], lists user tables from the catalog, and scans each one
//! into JSON rows. Nothing here ever writes to the source file.
//!
//! # Submodules
//!
//! - [`catalog`] - Table discovery and reserved-name filtering
//! - [`stats`] - Source file size and modification time
//! - [`value`] - Column value decoding to JSON

pub mod catalog;
pub mod stats;
pub mod value;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::config::ExportMode;
use crate::error::{ExportError, Result};

pub use catalog::{filter_user_tables, is_reserved, quote_identifier};
pub use stats::SourceStats;
pub use value::to_json;

/// A single decoded record: column name to value, in declaration order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Resolve the source database file.
///
/// Both modes require the file to exist: a read-only open must not
/// silently succeed against an empty, freshly created database.
///
/// # Errors
///
/// Returns `NotFound` if `path` is not an existing regular file.
pub fn locate(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ExportError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Flags passed to `sqlite3_open_v2` for each mode.
#[must_use]
pub fn open_flags(mode: ExportMode) -> OpenFlags {
    match mode {
        ExportMode::Exclusive => OpenFlags::default(),
        ExportMode::ConcurrentSafe => {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        }
    }
}

/// Open connection to the source database.
pub struct SourceDb {
    conn: Connection,
    path: PathBuf,
}

impl SourceDb {
    /// Open `path` with the connection semantics of `mode`.
    ///
    /// In concurrent-safe mode the busy timeout is zero: a lock held by
    /// another process fails the first read immediately instead of blocking.
    ///
    /// # Errors
    ///
    /// Returns `Open` if the engine rejects the file or the flags.
    pub fn open(path: &Path, mode: ExportMode) -> Result<Self> {
        let open_err = |source: rusqlite::Error| ExportError::Open {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(path, open_flags(mode)).map_err(open_err)?;
        if mode == ExportMode::ConcurrentSafe {
            conn.busy_timeout(Duration::ZERO).map_err(open_err)?;
        }

        tracing::debug!(path = %path.display(), mode = %mode, "Opened source database");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Start a deferred read transaction.
    ///
    /// Every later `list_tables` and `read_table` call sees the same
    /// database state until [`close`](Self::close) ends the transaction.
    /// The snapshot is taken at the first read, so a conflicting lock still
    /// fails there without waiting.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the transaction cannot be started.
    pub fn begin_snapshot(&self) -> Result<()> {
        self.conn
            .execute_batch("BEGIN DEFERRED")
            .map_err(|e| ExportError::query("starting read transaction", e))?;
        tracing::trace!(path = %self.path.display(), "Began read transaction");
        Ok(())
    }

    /// List exportable tables in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the catalog cannot be read (including a lock held
    /// by another process in concurrent-safe mode).
    pub fn list_tables(&self, reserved_prefix: &str) -> Result<Vec<String>> {
        let names = catalog::list_all_tables(&self.conn)?;
        let total = names.len();
        let tables = filter_user_tables(names, reserved_prefix);
        tracing::debug!(
            total,
            exported = tables.len(),
            "Discovered tables in catalog"
        );
        Ok(tables)
    }

    /// Read every row of `table` in the order the engine yields them.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the scan fails part way or a value cannot be read.
    pub fn read_table(&self, table: &str) -> Result<Vec<Row>> {
        let context = || format!("reading table {table}");
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        tracing::trace!(%sql, "Scanning table");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ExportError::query(context(), e))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| ExportError::query(context(), e))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|e| ExportError::query(context(), e))? {
            let mut record = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value = row
                    .get_ref(idx)
                    .map_err(|e| ExportError::query(context(), e))?;
                record.insert(column.clone(), to_json(value));
            }
            records.push(record);
        }

        tracing::debug!(table, rows = records.len(), "Read table");
        Ok(records)
    }

    /// End any open read transaction and close the connection, surfacing
    /// any error the engine reports.
    ///
    /// Dropping a `SourceDb` also closes it (rolling back the read
    /// transaction); this is for the success path where a close failure
    /// should still be visible.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the read transaction cannot be ended and `Close`
    /// if `sqlite3_close` fails.
    pub fn close(self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn
                .execute_batch("COMMIT")
                .map_err(|e| ExportError::query("ending read transaction", e))?;
        }
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| ExportError::Close { path, source })
    }
}
