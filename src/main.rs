//! `db-extract` - exclusive-mode export.
//!
//! Opens `prisma/dev.db` normally and writes `prisma/data_dump.json`.
//! Meant for offline use; unexpected failures exit non-zero.

use sqlite_extract::{ExportMode, run};

fn main() {
    if let Err(e) = run(ExportMode::Exclusive) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
