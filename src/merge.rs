//! Batch merger: appends an export batch onto the durable log.
//!
//! The durable log uses JSON Lines format, one record per line, and is
//! strictly append-only: existing lines are never rewritten or reordered
//! here. Every record is stamped `synced: false` on the way in, whatever the
//! batch said, so the downstream synchronizer sees it as pending.
//!
//! Malformed batch lines are diagnosed and skipped; only a missing batch
//! file aborts the run, and it does so before anything is written.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::SyncPaths;
use crate::record::Record;

/// Errors that can occur while merging a batch.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The export batch file does not exist. Fatal; nothing was written.
    #[error("export batch not found: {}", path.display())]
    BatchMissing { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while writing a record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// What one merge run did, counted per batch.
///
/// These are batch-local quantities. The whole-log pending total lives in
/// the status snapshot and is recomputed separately; the two are deliberately
/// not the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// Records successfully parsed and appended to the log.
    pub appended: u64,
    /// Malformed lines diagnosed and skipped.
    pub skipped: u64,
}

/// Merges the export batch at `paths.batch_path` into the durable log.
///
/// For each non-blank batch line: parse as a record, force `synced: false`,
/// and append one line to the log. Parse failures are logged and skipped,
/// never fatal. Records land in the same relative order they appear in the
/// batch. No deduplication is performed; merging the same batch twice
/// appends its records twice.
///
/// # Errors
///
/// Returns [`MergeError::BatchMissing`] if the batch file does not exist
/// (checked before the log is opened, so nothing is created or written),
/// or an IO/JSON error if reading or appending fails outright.
pub fn merge_batch(paths: &SyncPaths) -> Result<MergeReport> {
    if !paths.batch_path.exists() {
        return Err(MergeError::BatchMissing {
            path: paths.batch_path.clone(),
        });
    }

    info!(batch = %paths.batch_path.display(), "merging export batch");

    let reader = BufReader::new(File::open(&paths.batch_path)?);
    let mut writer = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_path)?,
    );

    let mut report = MergeReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match Record::parse(trimmed) {
            Ok(mut record) => {
                record.mark_unsynced();
                writeln!(writer, "{}", record.to_line()?)?;
                report.appended += 1;
            }
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping malformed batch line");
                report.skipped += 1;
            }
        }
    }

    // Surface flush errors here rather than losing them in drop.
    writer.flush()?;

    info!(
        appended = report.appended,
        skipped = report.skipped,
        log = %paths.log_path.display(),
        "batch merged"
    );

    Ok(report)
}
