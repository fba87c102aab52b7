//! Output formatting for `sqlite_extract`.
//!
//! Plain, unstyled status lines printed to stdout while an export runs.
//! Diagnostics go through `tracing` instead (see [`crate::logging`]).

mod text;

pub use text::{
    failure_line, missing_database_line, progress_line, source_line, start_line,
    success_line,
};
