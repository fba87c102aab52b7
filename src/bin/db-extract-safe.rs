//! `db-extract-safe` - concurrent-safe export.
//!
//! Opens `prisma/dev.db` read-only, without waiting on locks held by a
//! running application, and writes `prisma_full_data.json`. Always exits 0;
//! failures are reported on stdout.

use sqlite_extract::{ExportMode, run};

fn main() {
    if let Err(e) = run(ExportMode::ConcurrentSafe) {
        println!("FAILED: {e:#}");
    }
}
