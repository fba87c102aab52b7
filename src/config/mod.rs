//! Export configuration for `sqlite_extract`.
//!
//! Everything here is fixed by convention: the source database lives at
//! `prisma/dev.db` relative to the working directory, and each mode writes
//! to its own hard-coded destination so the two never overwrite each other.

use std::path::{Path, PathBuf};

/// Conventional location of the source database.
pub const DEFAULT_DB_PATH: &str = "prisma/dev.db";

/// Output written by exclusive mode.
pub const EXCLUSIVE_OUTPUT_PATH: &str = "prisma/data_dump.json";

/// Output written by concurrent-safe mode.
pub const SAFE_OUTPUT_PATH: &str = "prisma_full_data.json";

/// Tables whose names start with this prefix are internal bookkeeping
/// (e.g. `_prisma_migrations`) and are never exported.
pub const RESERVED_PREFIX: &str = "_";

/// How the source database is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Normal open; meant for offline use when nothing else holds the file.
    Exclusive,
    /// Read-only open that never waits on another process's lock.
    ConcurrentSafe,
}

impl ExportMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exclusive => "exclusive",
            Self::ConcurrentSafe => "concurrent-safe",
        }
    }

    /// Default destination for this mode, relative to the working directory.
    #[must_use]
    pub const fn output_path(self) -> &'static str {
        match self {
            Self::Exclusive => EXCLUSIVE_OUTPUT_PATH,
            Self::ConcurrentSafe => SAFE_OUTPUT_PATH,
        }
    }

    #[must_use]
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::Exclusive => FailurePolicy::Propagate,
            Self::ConcurrentSafe => FailurePolicy::Report,
        }
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the CLI does with an export failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error to `main`, which exits non-zero.
    Propagate,
    /// Print the cause and exit cleanly.
    Report,
}

/// Resolved settings for a single export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub mode: ExportMode,
    pub reserved_prefix: String,
}

impl ExportConfig {
    /// Conventional relative paths for `mode`.
    #[must_use]
    pub fn for_mode(mode: ExportMode) -> Self {
        Self {
            source: PathBuf::from(DEFAULT_DB_PATH),
            output: PathBuf::from(mode.output_path()),
            mode,
            reserved_prefix: RESERVED_PREFIX.to_string(),
        }
    }

    /// Conventional paths resolved under `root`.
    #[must_use]
    pub fn in_dir(root: &Path, mode: ExportMode) -> Self {
        let base = Self::for_mode(mode);
        Self {
            source: root.join(base.source),
            output: root.join(base.output),
            ..base
        }
    }

    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.mode.failure_policy()
    }
}
