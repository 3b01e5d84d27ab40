//! File-path configuration for the merge and status components.
//!
//! The production file names are fixed (no flags), but both components take
//! a [`SyncPaths`] rather than reaching for globals, so tests can point them
//! at a temporary directory.

use std::path::{Path, PathBuf};

/// Default name of the export batch produced by the upstream scraper.
pub const DEFAULT_BATCH_FILE: &str = "notes_export.jsonl";

/// Default name of the durable append-only log.
pub const DEFAULT_LOG_FILE: &str = "sync_data.jsonl";

/// Default name of the status snapshot file.
pub const DEFAULT_STATUS_FILE: &str = "sync_status.json";

/// Paths to the three files the core operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    /// Export batch to merge (read-only input).
    pub batch_path: PathBuf,
    /// Durable log (append-only output).
    pub log_path: PathBuf,
    /// Status snapshot (fully rewritten on each recompute).
    pub status_path: PathBuf,
}

impl SyncPaths {
    /// Resolves the default file names under the given directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        SyncPaths {
            batch_path: dir.join(DEFAULT_BATCH_FILE),
            log_path: dir.join(DEFAULT_LOG_FILE),
            status_path: dir.join(DEFAULT_STATUS_FILE),
        }
    }
}

impl Default for SyncPaths {
    /// The production configuration: default file names in the working directory.
    fn default() -> Self {
        SyncPaths::in_dir(".")
    }
}
