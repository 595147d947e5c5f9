//! Cache Store Module
//!
//! Unsynchronized key-value storage with timestamped entries. Locking and the
//! background reaper live in [`crate::cache::Cache`].

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Map of keys to timestamped byte values.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and reap counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// An existing entry is replaced in full, timestamp included.
    pub fn insert(&mut self, key: String, value: Vec<u8>) {
        self.insert_entry(key, CacheEntry::new(value));
    }

    /// Stores a prebuilt entry under `key`.
    pub fn insert_entry(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Entries past their interval but not yet reaped are still returned.
    /// The entry's timestamp is left untouched.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().to_vec())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry older than `interval` as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, now: DateTime<Utc>, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, interval));
        let removed = before - self.entries.len();

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = CacheStore::new();

        store.insert("a".to_string(), vec![1, 2, 3]);

        assert_eq!(store.get("a"), Some(vec![1, 2, 3]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_store_overwrite_replaces_timestamp() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        store.insert_entry(
            "x".to_string(),
            CacheEntry::created_at(b"old".to_vec(), now - TimeDelta::seconds(10)),
        );
        store.insert("x".to_string(), b"new".to_vec());

        // The fresh timestamp keeps the overwritten entry alive
        assert_eq!(store.reap(Utc::now(), INTERVAL), 0);
        assert_eq!(store.get("x"), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_reap_removes_only_stale() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        store.insert_entry(
            "stale".to_string(),
            CacheEntry::created_at(vec![1], now - TimeDelta::milliseconds(150)),
        );
        store.insert_entry(
            "fresh".to_string(),
            CacheEntry::created_at(vec![2], now - TimeDelta::milliseconds(50)),
        );

        let removed = store.reap(now, INTERVAL);

        assert_eq!(removed, 1);
        assert_eq!(store.get("stale"), None);
        assert_eq!(store.get("fresh"), Some(vec![2]));
    }

    #[test]
    fn test_store_reap_empty() {
        let mut store = CacheStore::new();
        assert_eq!(store.reap(Utc::now(), INTERVAL), 0);
    }

    #[test]
    fn test_store_get_does_not_refresh() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        store.insert_entry(
            "k".to_string(),
            CacheEntry::created_at(vec![9], now - TimeDelta::milliseconds(150)),
        );

        // A hit before the reap must not extend the entry's life
        assert!(store.get("k").is_some());
        assert_eq!(store.reap(now, INTERVAL), 1);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.insert("key1".to_string(), vec![1]);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reaped, 0);
        assert_eq!(stats.total_entries, 1);
    }
}
