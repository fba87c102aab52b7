//! JSON encoding and atomic file replacement.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::ExportDocument;
use crate::error::{ExportError, Result};

/// Encode the document as indented JSON (2 spaces, UTF-8, non-ASCII kept as-is).
///
/// # Errors
///
/// Returns `Serialize` if encoding fails.
pub fn serialize(document: &ExportDocument) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(document)?)
}

/// Persist `bytes` at `path`, replacing any existing file.
///
/// Writes to a sibling temp file first and renames it into place, so an
/// interrupted run never leaves a truncated document at `path`.
///
/// # Errors
///
/// Returns `Write` if the directory, temp file, or rename fails.
pub fn write_document(bytes: &[u8], path: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = temp_path(path);
    let mut file = fs::File::create(&tmp_path).map_err(write_err)?;
    if let Err(err) = file.write_all(bytes).and_then(|()| file.sync_all()) {
        drop(file);
        discard_temp(&tmp_path);
        return Err(write_err(err));
    }
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        discard_temp(&tmp_path);
        return Err(write_err(err));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote export document");
    Ok(())
}

/// `data_dump.json` -> `data_dump.json.tmp`, in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("export"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

fn discard_temp(tmp_path: &Path) {
    if let Err(err) = fs::remove_file(tmp_path) {
        tracing::debug!(path = %tmp_path.display(), "Could not remove temp file: {err}");
    }
}
