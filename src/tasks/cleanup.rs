//! Cache Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Lazy expiry on read keeps stale banners from being served; the sweep only
//! reclaims memory held by keys nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{deadline_after, BannerCache};

/// Handle to a running sweep task.
///
/// [`SweepHandle::close`] stops the task and waits for it to finish. Closing
/// more than once is allowed; later calls return immediately.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SweepHandle {
    /// Signals the task to stop and awaits its exit.
    pub async fn close(&self) {
        let task = self.task.lock().take();
        let Some(task) = task else {
            debug!("cache sweep already closed");
            return;
        };

        // Fails only if the task already exited and dropped its receiver
        let _ = self.shutdown.send(true);

        if let Err(err) = task.await {
            warn!("cache sweep task ended abnormally: {}", err);
        }
        info!("cache sweep stopped");
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.task.lock().is_none()
    }
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The first sweep runs one full interval after spawning.
pub fn spawn_cleanup_task(cache: Arc<BannerCache>, interval: Duration) -> SweepHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            "Starting cache sweep with interval of {} seconds",
            interval.as_secs()
        );

        let start = deadline_after(tokio::time::Instant::now(), interval);
        let mut ticker = tokio::time::interval_at(start, interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.cleanup_expired();
                    if removed > 0 {
                        info!("Cache sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });

    SweepHandle {
        shutdown,
        task: Mutex::new(Some(task)),
    }
}
