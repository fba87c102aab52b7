use assert_cmd::Command;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

pub const EXCLUSIVE_BIN: &str = "db-extract";
pub const SAFE_BIN: &str = "db-extract-safe";

/// A throwaway working directory laid out like an application checkout.
pub struct ExtractWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl ExtractWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Create `prisma/dev.db` and run `sql` against it.
    pub fn with_database(sql: &str) -> Self {
        let workspace = Self::new();
        fs::create_dir_all(workspace.root.join("prisma")).expect("create prisma dir");
        let conn = Connection::open(workspace.db_path()).expect("open seed db");
        conn.execute_batch(sql).expect("seed db");
        workspace
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join("prisma").join("dev.db")
    }

    pub fn exclusive_output(&self) -> PathBuf {
        self.root.join("prisma").join("data_dump.json")
    }

    pub fn safe_output(&self) -> PathBuf {
        self.root.join("prisma_full_data.json")
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let text = fs::read_to_string(path).expect("read output");
        serde_json::from_str(&text).expect("parse output")
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run one of the binaries with no arguments inside `workspace`.
pub fn run_extract(workspace: &ExtractWorkspace, bin: &str, label: &str) -> RunOutput {
    run_extract_with_args(workspace, bin, &[], label)
}

pub fn run_extract_with_args(
    workspace: &ExtractWorkspace,
    bin: &str,
    args: &[&str],
    label: &str,
) -> RunOutput {
    let output = Command::cargo_bin(bin)
        .unwrap_or_else(|e| panic!("{label}: locate {bin}: {e}"))
        .args(args)
        .current_dir(&workspace.root)
        .env_remove("RUST_LOG")
        .timeout(std::time::Duration::from_secs(30))
        .output()
        .unwrap_or_else(|e| panic!("{label}: run {bin}: {e}"));

    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
