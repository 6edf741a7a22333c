//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, InvalidatePattern, LruTracker, StatsSnapshot};
use crate::config::CacheConfig;

/// Outcome of [`CacheStore::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Live entry
    Fresh(V),
    /// Entry was present but expired; it has now been removed
    Expired(V),
    /// No entry under the key
    Missing,
}

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and TTL support.
///
/// None of the operations fail: lookups return `Option`, writes always
/// succeed by evicting the least recently used entry when full.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL for `set` calls without an explicit TTL
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
            default_ttl,
        }
    }

    /// Creates a store sized from `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.default_ttl)
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry and resetting its TTL.
    ///
    /// When a new key arrives at capacity the least recently used entries
    /// are evicted first, so the store never grows past `max_size`.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_size {
                let Some(evicted) = self.lru.evict_oldest() else {
                    break;
                };
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "Evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. Expired entries are
    /// removed and counted as both an expiration and a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.lookup(key) {
            Lookup::Fresh(value) => Some(value),
            Lookup::Expired(_) | Lookup::Missing => None,
        }
    }

    // == Lookup ==
    /// Same bookkeeping as `get`, but the value of an entry removed for
    /// being expired is handed back instead of dropped.
    pub fn lookup(&mut self, key: &str) -> Lookup<V> {
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return Lookup::Missing;
        };

        if entry.is_expired() {
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key, "Removed expired entry on read");
            return match self.entries.remove(key) {
                Some(expired) => Lookup::Expired(expired.value),
                None => Lookup::Missing,
            };
        }

        entry.touch();
        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Lookup::Fresh(value)
    }

    // == Get Stale ==
    /// Returns the stored value whether or not it has expired.
    ///
    /// Leaves counters and recency untouched.
    pub fn get_stale(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Whether a fresh entry exists for `key`, without counting a read.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Delete ==
    /// Removes an entry by key, returning whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Invalidate ==
    /// Removes every entry whose key matches `pattern`.
    ///
    /// A string pattern matches by prefix, a `Regex` by `is_match`.
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, pattern: impl Into<InvalidatePattern>) -> usize {
        let pattern = pattern.into();
        let matched: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect();

        for key in &matched {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        if !matched.is_empty() {
            debug!(removed = matched.len(), ?pattern, "Invalidated cache entries");
        }
        matched.len()
    }

    // == Clear ==
    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        info!("Cache cleared: removed {} entries", count);
        count
    }

    // == Cleanup ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
        }

        if !expired_keys.is_empty() {
            debug!(removed = expired_keys.len(), "Swept expired entries");
        }
        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters plus current size and capacity.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.entries.len(), self.max_size)
    }

    /// Zeroes hits, misses, evictions and expirations. Entries are kept.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Length ==
    /// Returns the current number of entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
