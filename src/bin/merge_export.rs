//! Merges the latest export batch into the sync log, then refreshes the
//! status snapshot. The two-phase pipeline run.

use std::process::ExitCode;

use note_sync::{merge_batch, recompute, SyncPaths};
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

    let report = match merge_batch(&paths) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "merge aborted");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = match recompute(&paths) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "status recompute failed");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "appended {} record(s), skipped {} malformed line(s)",
        report.appended, report.skipped
    );
    println!("log hash: {}", snapshot.hash);
    println!("unsynced total: {}", snapshot.unsynced_count);

    ExitCode::SUCCESS
}
