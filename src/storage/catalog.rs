//! Table discovery.
//!
//! The catalog (`sqlite_master`) lists every object in the file. Only
//! entries of type `table` are considered, and names following either
//! internal naming convention are dropped before export.

use rusqlite::Connection;

use crate::error::{ExportError, Result};

/// SQLite reserves this prefix (case-insensitively) for its own tables,
/// e.g. `sqlite_sequence` and `sqlite_stat1`.
const SQLITE_INTERNAL_PREFIX: &str = "sqlite_";

/// All table names in catalog order, unfiltered.
///
/// # Errors
///
/// Returns `Query` if `sqlite_master` cannot be read.
pub fn list_all_tables(conn: &Connection) -> Result<Vec<String>> {
    let context = "listing tables";
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table'")
        .map_err(|e| ExportError::query(context, e))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| ExportError::query(context, e))?;

    let mut tables = Vec::new();
    for row in rows {
        tables.push(row.map_err(|e| ExportError::query(context, e))?);
    }
    Ok(tables)
}

/// Whether `name` is internal bookkeeping rather than application data.
#[must_use]
pub fn is_reserved(name: &str, reserved_prefix: &str) -> bool {
    if !reserved_prefix.is_empty() && name.starts_with(reserved_prefix) {
        return true;
    }
    name.get(..SQLITE_INTERNAL_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SQLITE_INTERNAL_PREFIX))
}

/// Drop reserved names, keeping the remaining order.
#[must_use]
pub fn filter_user_tables(names: Vec<String>, reserved_prefix: &str) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| {
            let reserved = is_reserved(name, reserved_prefix);
            if reserved {
                tracing::trace!(table = %name, "Skipping internal table");
            }
            !reserved
        })
        .collect()
}

/// Quote `name` as an SQL identifier.
///
/// Wraps in double quotes and doubles any embedded quote, so names with
/// spaces, keywords, or quotes are scanned as written.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
