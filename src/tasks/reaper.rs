//! Cache Reaper Task
//!
//! Background task that periodically removes cache entries older than the
//! cache interval, until told to stop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reaper for `store` on `runtime`.
///
/// Starting at `first_reap` and then every `interval`, the task locks the
/// store, drops entries older than `interval` and releases the lock before
/// waiting for the next tick.
///
/// The loop exits when `shutdown` carries `true` or when its sender is
/// dropped, so the returned handle can be awaited for a clean stop.
///
/// `interval` must be non-zero.
pub fn spawn_reaper(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    first_reap: Instant,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        debug!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = time::interval_at(first_reap, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut guard = store.lock().await;
                        guard.reap(Utc::now(), interval)
                    };

                    if removed > 0 {
                        info!("Cache reap: removed {} expired entries", removed);
                    } else {
                        debug!("Cache reap: no expired entries found");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Cache reaper stopped");
    })
}
