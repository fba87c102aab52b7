//! Diagnostic logging for `sqlite_extract`.
//!
//! Operator-facing progress goes to stdout via `println!`. Everything here is
//! `tracing` output on stderr (or a log file) so the two never interleave on
//! the same stream.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Map CLI verbosity flags to a default filter directive.
///
/// `RUST_LOG`, when set, takes precedence over this.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global `tracing` subscriber.
///
/// A subscriber that is already installed is left in place.
///
/// # Errors
///
/// Returns an error if `log_file` cannot be opened for appending.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    if installed.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
    Ok(())
}
