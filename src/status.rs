//! Status recorder: recomputes the sync status snapshot from the durable log.
//!
//! The snapshot holds a SHA-256 checksum of the whole log plus a recount of
//! records still pending synchronization. Both values are recomputed from
//! scratch on every run — never patched incrementally — so the snapshot
//! cannot drift from the true log contents no matter how many merges or
//! out-of-band `synced` flips happened since the last run.
//!
//! # Atomic Rewrite
//!
//! The snapshot file is replaced using write-to-temp-then-rename with file
//! and directory fsync, so readers always see either the previous snapshot
//! or the new one, never a partial write.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SyncPaths;
use crate::fsync::{fsync_dir, fsync_file};
use crate::record::Record;

/// Hash sentinel for a durable log that does not exist yet.
pub const NO_DATA_HASH: &str = "no_data";

/// Hash value in the default snapshot, before any recompute has run.
pub const INITIAL_HASH: &str = "initial";

/// Chunk size for streaming the log through the hasher.
const HASH_CHUNK_SIZE: usize = 4096;

/// Errors that can occur while recomputing or persisting the snapshot.
#[derive(Debug, Error)]
pub enum StatusError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while writing the snapshot.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for status operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// The persisted sync status: full-log checksum and pending-record total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// SHA-256 of the full durable log bytes (64 hex chars), or a sentinel:
    /// `"no_data"` when the log does not exist, `"initial"` before the first
    /// recompute.
    pub hash: String,

    /// Number of log records whose `synced` field is absent or not `true`.
    pub unsynced_count: u64,
}

impl Default for StatusSnapshot {
    /// The snapshot assumed when no valid status file exists yet.
    fn default() -> Self {
        StatusSnapshot {
            hash: INITIAL_HASH.to_string(),
            unsynced_count: 0,
        }
    }
}

/// Computes the SHA-256 of the durable log, streaming in fixed-size chunks.
///
/// A missing log is not an error: it hashes to the [`NO_DATA_HASH`] sentinel.
pub fn hash_log(path: &Path) -> io::Result<String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(NO_DATA_HASH.to_string());
        }
        Err(e) => return Err(e),
    };

    let mut hasher = Sha256::new();
    let mut buf = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Counts log records still pending synchronization.
///
/// Best-effort recount: lines that fail to parse are skipped silently, unlike
/// the merge path which diagnoses each one. A record counts as synced only if
/// it carries an explicit `"synced": true`. A missing log counts zero.
pub fn count_unsynced(path: &Path) -> io::Result<u64> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut count = 0;
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Ok(record) = Record::parse(trimmed) {
            if !record.is_synced() {
                count += 1;
            }
        }
    }

    Ok(count)
}

/// Loads the persisted snapshot, substituting the default when the file is
/// missing or unreadable.
///
/// The recorder never consults this value for a recompute; it exists for the
/// audit trail and for external readers that want the last known status.
pub fn load_status(path: &Path) -> StatusSnapshot {
    match std::fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
        Err(_) => StatusSnapshot::default(),
    }
}

/// Persists the snapshot atomically.
///
/// Write-to-temp-then-rename: write `<path>.tmp`, fsync it, rename over the
/// real path, fsync the parent directory. Pretty-printed for human inspection.
pub fn save_status_atomic(path: &Path, snapshot: &StatusSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(snapshot)?;

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(&bytes)?;
        fsync_file(&file)?;
    }

    std::fs::rename(&tmp_path, path)?;

    if let Some(parent) = path.parent() {
        fsync_dir(parent)?;
    }

    Ok(())
}

/// Recomputes the status snapshot from the durable log and persists it.
///
/// Full re-scan every time: checksum over all log bytes, recount over all
/// log lines. The prior snapshot is read tolerantly and logged but never
/// feeds into the new values.
pub fn recompute(paths: &SyncPaths) -> Result<StatusSnapshot> {
    let hash = hash_log(&paths.log_path)?;
    let unsynced_count = count_unsynced(&paths.log_path)?;

    let prior = load_status(&paths.status_path);
    debug!(
        prior_hash = %prior.hash,
        prior_unsynced = prior.unsynced_count,
        "replacing prior status snapshot"
    );

    let snapshot = StatusSnapshot {
        hash,
        unsynced_count,
    };
    save_status_atomic(&paths.status_path, &snapshot)?;

    info!(
        hash = %snapshot.hash,
        unsynced = snapshot.unsynced_count,
        "status snapshot updated"
    );

    Ok(snapshot)
}
