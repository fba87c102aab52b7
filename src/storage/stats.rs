//! Source file statistics.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Size and modification time of the source database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl SourceStats {
    /// Read stats for `path`, or `None` if the metadata is unavailable.
    ///
    /// Stats are informational; a failure here never stops an export.
    #[must_use]
    pub fn read(path: &Path) -> Option<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Could not stat source database: {err}");
                return None;
            }
        };
        Some(Self {
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    /// Human-readable one-liner, e.g. `Size: 4096 bytes, modified 2024-05-01T10:00:00Z`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.modified {
            Some(ts) => format!(
                "Size: {} bytes, modified {}",
                self.size,
                ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            ),
            None => format!("Size: {} bytes", self.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_read_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.db");
        fs::write(&path, [0u8; 128]).unwrap();

        let stats = SourceStats::read(&path).unwrap();
        assert_eq!(stats.size, 128);
        assert!(stats.modified.is_some());
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SourceStats::read(&dir.path().join("absent.db")).is_none());
    }

    #[test]
    fn test_describe() {
        let stats = SourceStats {
            size: 4096,
            modified: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        };
        assert_eq!(
            stats.describe(),
            "Size: 4096 bytes, modified 2024-05-01T10:00:00Z"
        );
        let bare = SourceStats {
            size: 0,
            modified: None,
        };
        assert_eq!(bare.describe(), "Size: 0 bytes");
    }
}
