//! Cache Store Module
//!
//! TTL-bounded banner table guarded by a single readers-writer lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheStats};
use crate::models::Banner;

// == Banner Cache ==
/// In-memory banner cache with a fixed TTL for every entry.
///
/// Reads share the lock; `set`, `delete` and evictions take it exclusively.
/// None of the operations can fail: a missing or stale entry is a miss.
#[derive(Debug)]
pub struct BannerCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Hit/miss/expiry counters
    counters: CacheCounters,
    /// Lifetime of every entry
    ttl: Duration,
}

impl BannerCache {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            counters: CacheCounters::new(),
            ttl,
        }
    }

    /// The TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, restarting its TTL.
    pub fn set(&self, key: impl Into<String>, banner: Arc<Banner>) {
        let entry = CacheEntry::new(banner, self.ttl);
        self.entries.write().insert(key.into(), entry);
    }

    // == Get ==
    /// Returns the banner cached under `key` if it has not expired.
    ///
    /// An expired entry is removed before reporting the miss.
    pub fn get(&self, key: &str) -> Option<Arc<Banner>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired_at(now) => {
                    self.counters.record_hit();
                    return Some(Arc::clone(&entry.banner));
                }
                Some(_) => {}
                None => {
                    self.counters.record_miss();
                    return None;
                }
            }
        }

        // Another writer may have refreshed the key between the two locks.
        let mut entries = self.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now))
        {
            entries.remove(key);
            self.counters.record_expired(1);
            debug!(key, "evicted expired cache entry on read");
        }
        self.counters.record_miss();
        None
    }

    // == Delete ==
    /// Removes the entry for `key`. Absent keys are ignored.
    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        self.counters.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Whether an entry, fresh or stale, is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}
