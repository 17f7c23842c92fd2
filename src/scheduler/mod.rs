//! Periodic snapshot scheduling
//!
//! Runs [`BackupManager::run_tick`] on a background thread at a fixed delay
//! until cancelled. The delay is measured from the end of one tick to the
//! start of the next; cancellation is only observed between ticks.

mod cancel;

pub use cancel::CancellationToken;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::backup::{BackupManager, TickOutcome};
use crate::error::{GhostSaverError, GhostSaverResult};

/// Spawns the snapshot loop
pub struct SnapshotScheduler;

impl SnapshotScheduler {
    /// Start ticking on a background thread
    ///
    /// The first tick runs immediately. Tick failures are logged and the
    /// loop carries on after the normal delay.
    pub fn spawn(
        manager: Arc<BackupManager>,
        interval: Duration,
        token: CancellationToken,
    ) -> GhostSaverResult<SchedulerHandle> {
        let ticks = Arc::new(AtomicU64::new(0));

        let thread = {
            let token = token.clone();
            let ticks = ticks.clone();
            thread::Builder::new()
                .name("snapshot-scheduler".into())
                .spawn(move || run_loop(&manager, interval, &token, &ticks))
                .map_err(|e| GhostSaverError::Io(format!("Failed to start scheduler: {}", e)))?
        };

        info!(interval_secs = interval.as_secs(), "Backup scheduler started");

        Ok(SchedulerHandle {
            token,
            ticks,
            thread: Some(thread),
        })
    }
}

fn run_loop(manager: &BackupManager, interval: Duration, token: &CancellationToken, ticks: &AtomicU64) {
    while !token.is_cancelled() {
        match manager.run_tick() {
            Ok(TickOutcome::Skipped { snapshot }) => {
                debug!(snapshot = %snapshot, "Tick skipped");
            }
            Ok(TickOutcome::Created(report)) if !report.is_complete() => {
                error!(
                    snapshot = %report.snapshot,
                    failed = report.failures.len() + report.eviction_failures.len(),
                    "Backup finished with errors"
                );
            }
            Ok(TickOutcome::Created(_)) => {}
            Err(e) => error!(error = %e, "Failed to backup saves"),
        }
        ticks.fetch_add(1, Ordering::SeqCst);

        if token.wait_timeout(interval) {
            break;
        }
    }

    debug!("Backup scheduler stopped");
}

/// Handle to a running scheduler
///
/// Dropping the handle cancels the loop and waits for it to exit.
pub struct SchedulerHandle {
    token: CancellationToken,
    ticks: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Number of ticks run so far, skipped and failed ones included
    pub fn ticks_run(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// The token observed by the loop
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the loop and wait for the thread to finish
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.token.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Backup scheduler thread panicked");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
