//! note-sync - merges scraped note export batches into a durable sync log.
//!
//! Two components over JSON Lines files: the batch merger appends export
//! records to an append-only log with `synced: false` forced on each, and the
//! status recorder rebuilds a `{hash, unsynced_count}` snapshot from the
//! whole log. A downstream synchronizer (not part of this crate) drains the
//! pending records and flips `synced` in place.

pub mod config;
pub mod fsync;
pub mod merge;
pub mod record;
pub mod status;

pub use config::SyncPaths;
pub use merge::{merge_batch, MergeError, MergeReport};
pub use record::{ParseError, Record};
pub use status::{recompute, StatusError, StatusSnapshot};
