//! Periodic pass scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::service::SyncService;

/// Spawns the background loop that runs a pass immediately and then once per
/// `interval`.
///
/// The next wait is armed only after the previous pass finishes, so passes
/// never overlap. Cancelling `cancel` stops the loop at the next wait; a pass
/// already running is allowed to finish.
pub fn spawn_scheduler(
    service: Arc<SyncService>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_schedule(service, interval, cancel))
}

async fn run_schedule(service: Arc<SyncService>, interval: Duration, cancel: CancellationToken) {
    info!(interval_secs = interval.as_secs(), "Sync scheduler started");

    while !cancel.is_cancelled() {
        service.run_pass().await;

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = sleep(interval) => {}
        }
    }

    info!("Sync scheduler stopped");
}
