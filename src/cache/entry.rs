//! Cache Entry Module
//!
//! Defines the structure for individual cache entries stamped at insertion.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A stored value together with the moment it was inserted.
///
/// Both fields are fixed once the entry is built; an overwrite replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    value: Vec<u8>,
    /// Insertion timestamp
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current wall-clock time.
    pub fn new(value: Vec<u8>) -> Self {
        Self::created_at(value, Utc::now())
    }

    /// Creates an entry with an explicit creation time.
    pub fn created_at(value: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        Self { value, created_at }
    }

    /// The stored bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// When the entry was inserted.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    // == Age ==
    /// Time elapsed between insertion and `now`.
    ///
    /// Saturates at zero when `now` is earlier than the creation time, so a
    /// clock stepping backwards keeps entries alive instead of expiring them.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or(Duration::ZERO)
    }

    // == Is Expired ==
    /// An entry is expired once its age strictly exceeds `interval`.
    pub fn is_expired(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        self.age(now) > interval
    }
}
