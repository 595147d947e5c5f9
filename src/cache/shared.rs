//! Shared Cache Module
//!
//! Thread-safe cache handle: a locked [`CacheStore`] plus the reaper task
//! that keeps it trimmed.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;
use crate::tasks::spawn_reaper;

// == Cache ==
/// Time-bounded key-value cache shared between callers.
///
/// Every `add`, `get` and reap pass takes the same lock, so operations on one
/// cache are totally ordered. Entries live for at least `interval` and are
/// removed by the reaper within one further interval.
///
/// Dropping the cache stops its reaper; [`Cache::close`] additionally waits
/// for the task to finish.
#[derive(Debug)]
pub struct Cache {
    /// Locked entry map, shared with the reaper
    store: Arc<Mutex<CacheStore>>,
    /// Expiry threshold and reap period
    interval: Duration,
    /// Flipped to `true` to stop the reaper
    shutdown: watch::Sender<bool>,
    /// Reaper task, taken by the first `close`
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current Tokio
    /// runtime.
    ///
    /// # Errors
    /// - [`CacheError::InvalidInterval`] when `interval` is zero or too large
    ///   to schedule a reap for
    /// - [`CacheError::NoRuntime`] when called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval(interval));
        }
        let first_reap = Instant::now()
            .checked_add(interval)
            .ok_or(CacheError::InvalidInterval(interval))?;
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(&runtime, store.clone(), first_reap, interval, shutdown_rx);

        debug!("Cache created with interval of {:?}", interval);

        Ok(Self {
            store,
            interval,
            shutdown,
            reaper: Mutex::new(Some(reaper)),
        })
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamped with the current
    /// time.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        self.store.lock().await.insert(key, value);
    }

    // == Get ==
    /// Returns the value for `key` if it has not been reaped yet.
    ///
    /// A hit does not extend the entry's life.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().await.get(key)
    }

    // == Close ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries stay readable afterwards but are no longer reaped. Calling
    /// `close` more than once is harmless.
    pub async fn close(&self) {
        self.shutdown.send_replace(true);

        let handle = self.reaper.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!("Cache reaper ended abnormally: {}", err);
            }
            debug!("Cache closed");
        }
    }

    /// Expiry threshold and reap period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of entries currently held, including expired ones awaiting a
    /// reap.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true if no entries are held.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Snapshot of the hit, miss and reap counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }
}
