//! Command-line interface for `sqlite_extract`.
//!
//! Both binaries share this parser. There are no positional arguments and
//! no way to change the source or destination: running the binary performs
//! the export. The flags only control diagnostics.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use crate::config::{ExportConfig, ExportMode, FailurePolicy};
use crate::export::{ExportSummary, export_database};
use crate::{format, logging};

/// Snapshot every user table of `prisma/dev.db` into a JSON file.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Snapshot every user table of prisma/dev.db into a JSON file",
    long_about = None,
    after_help = "Tables whose names start with '_' are internal and are skipped."
)]
pub struct Cli {
    /// Verbose diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Append diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Parse arguments, set up logging, and run the export for `mode`.
///
/// # Errors
///
/// In exclusive mode, returns any failure other than a missing source
/// database. In concurrent-safe mode, only a logging setup failure can
/// escape; export failures and bad arguments are printed instead.
pub fn run(mode: ExportMode) -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if exits_on_parse_error(&err, mode) => err.exit(),
        Err(err) => {
            println!("{}", format::failure_line(&parse_failure(&err)));
            return Ok(());
        }
    };
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    execute(&ExportConfig::for_mode(mode))
}

/// Help and version requests always print and exit. Other parse errors keep
/// clap's usage exit code in exclusive mode only.
fn exits_on_parse_error(err: &clap::Error, mode: ExportMode) -> bool {
    mode == ExportMode::Exclusive
        || matches!(
            err.kind(),
            ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        )
}

/// First line of clap's message, without its `error: ` label.
fn parse_failure(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Run one export and apply the mode's failure policy.
///
/// # Errors
///
/// Returns the export error when the policy is [`FailurePolicy::Propagate`]
/// and the source database exists.
pub fn execute(config: &ExportConfig) -> Result<()> {
    tracing::debug!(
        source = %config.source.display(),
        output = %config.output.display(),
        mode = %config.mode,
        "Starting export"
    );

    if let Some(line) = format::start_line(&config.source, config.mode) {
        println!("{line}");
    }

    let result = export_database(config, |event| {
        if let Some(line) = format::progress_line(&event, config.mode) {
            println!("{line}");
        }
    });

    match (result, config.failure_policy()) {
        (Ok(summary), _) => {
            report_success(&summary);
            Ok(())
        }
        (Err(err), FailurePolicy::Propagate) if err.is_not_found() => {
            println!("{}", format::missing_database_line(&config.source));
            Ok(())
        }
        (Err(err), FailurePolicy::Propagate) => {
            tracing::error!("Export failed: {err}");
            Err(err.into())
        }
        (Err(err), FailurePolicy::Report) => {
            tracing::error!("Export failed: {err}");
            println!("{}", format::failure_line(&err));
            Ok(())
        }
    }
}

fn report_success(summary: &ExportSummary) {
    tracing::info!("{}", format::source_line(summary));
    for table in &summary.tables {
        tracing::debug!(table = %table.name, rows = table.rows, "Exported table");
    }
    println!("{}", format::success_line(summary));
}
