//! Error types for `sqlite_extract`.
//!
//! One variant per stage of the export pipeline so callers can tell a
//! missing source apart from a failed open, query, or write.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    // === Source Errors ===
    /// The source database file does not exist.
    #[error("Database not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The storage engine refused to open the file (bad flags, corrupt file, lock).
    #[error("Failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The engine reported an error while releasing the connection.
    #[error("Failed to close database {}: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Catalog listing or table scan failed.
    #[error("Query failed ({context}): {source}")]
    Query {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    // === Output Errors ===
    /// JSON encoding of the export document failed.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    #[must_use]
    pub fn query(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Query {
            context: context.into(),
            source,
        }
    }

    /// Returns true for the missing-source case, which exclusive mode reports
    /// without failing the process.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type using `ExportError`.
pub type Result<T> = std::result::Result<T, ExportError>;
