//! Standalone status recompute: rebuilds the snapshot from the sync log
//! without merging anything. Useful as a consistency re-check after the
//! downstream synchronizer has flipped records in place.

use std::process::ExitCode;

use note_sync::{recompute, SyncPaths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "note_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let paths = SyncPaths::default();

    match recompute(&paths) {
        Ok(snapshot) => {
            println!("log hash: {}", snapshot.hash);
            println!("unsynced total: {}", snapshot.unsynced_count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "status recompute failed");
            ExitCode::FAILURE
        }
    }
}
