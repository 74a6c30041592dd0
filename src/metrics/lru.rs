//! LRU Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics kept by [`LruCache`](crate::LruCache).
///
/// On top of the core counters the LRU cache separates the two ways an entry
/// can leave besides eviction, and counts in-place overwrites:
///
/// - `removals`: entries dropped by an explicit `remove`
/// - `updates`: `put` calls that replaced the value of a key already cached
#[derive(Debug, Clone, PartialEq)]
pub struct LruCacheMetrics {
    /// Counters common to all caches.
    pub core: CoreCacheMetrics,
    /// Entries removed explicitly by the caller.
    pub removals: u64,
    /// Overwrites of an existing key.
    pub updates: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics measured against `max_cache_size_bytes`.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
            removals: 0,
            updates: 0,
        }
    }

    /// An entry was removed by the caller.
    pub fn record_removal(&mut self, object_size: u64) {
        self.removals += 1;
        self.core.record_release(object_size);
    }

    /// An existing entry's value was replaced.
    pub fn record_update(&mut self, object_size: u64) {
        self.updates += 1;
        self.core.bytes_written_to_cache += object_size;
    }

    /// Every entry was dropped at once.
    pub fn record_clear(&mut self) {
        self.core.cache_size_bytes = 0;
    }

    /// Core metrics plus `removals` and `updates`.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
