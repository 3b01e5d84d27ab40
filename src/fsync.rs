//! Durability helpers for the status snapshot rewrite.
//!
//! Renaming a file updates its directory entry; without an fsync on the
//! directory the rename itself may not survive a power loss even when the
//! file contents were synced. Both halves are needed for the snapshot's
//! write-to-temp-then-rename pattern.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Syncs a file's contents and metadata to disk (`fsync(2)`).
pub fn fsync_file(file: &File) -> io::Result<()> {
    file.sync_all()
}

/// Syncs a directory to disk so renames and creations within it are durable.
pub fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}
