//! Cache Metrics
//!
//! Counters describing how a cache has been used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! A `BTreeMap` keeps the keys sorted, so two reports taken from caches that
//! saw the same workload print and compare identically.
//!
//! [`CoreCacheMetrics`] holds the counters every cache keeps (requests, hits,
//! bytes moved, evictions, current size). [`LruCacheMetrics`] wraps it and adds
//! counters that only make sense for the LRU cache.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters shared by every cache.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoreCacheMetrics {
    /// Lookups made against the cache, hits and misses together.
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// Estimated bytes asked for across all lookups.
    pub total_bytes_requested: u64,

    /// Estimated bytes returned by lookups that hit.
    pub bytes_served_from_cache: u64,

    /// Estimated bytes stored by insertions and overwrites.
    pub bytes_written_to_cache: u64,

    /// Entries dropped because the cache was full.
    pub evictions: u64,

    /// Estimated bytes currently held.
    pub cache_size_bytes: u64,

    /// Byte budget that `cache_size_bytes` is measured against.
    pub max_cache_size_bytes: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters measured against `max_cache_size_bytes`.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            max_cache_size_bytes,
            ..Default::default()
        }
    }

    /// A lookup found its key.
    pub fn record_hit(&mut self, object_size: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.total_bytes_requested += object_size;
        self.bytes_served_from_cache += object_size;
    }

    /// A lookup did not find its key.
    pub fn record_miss(&mut self, object_size: u64) {
        self.requests += 1;
        self.total_bytes_requested += object_size;
    }

    /// The least recently used entry was dropped to make room.
    pub fn record_eviction(&mut self, evicted_size: u64) {
        self.evictions += 1;
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(evicted_size);
    }

    /// A new entry was stored.
    pub fn record_insertion(&mut self, object_size: u64) {
        self.cache_size_bytes += object_size;
        self.bytes_written_to_cache += object_size;
    }

    /// An entry left the cache for a reason other than eviction.
    pub fn record_release(&mut self, object_size: u64) {
        self.cache_size_bytes = self.cache_size_bytes.saturating_sub(object_size);
    }

    /// Number of lookups that missed.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of requested bytes that were served from the cache.
    pub fn byte_hit_rate(&self) -> f64 {
        if self.total_bytes_requested > 0 {
            self.bytes_served_from_cache as f64 / self.total_bytes_requested as f64
        } else {
            0.0
        }
    }

    /// Current size relative to the byte budget.
    pub fn cache_utilization(&self) -> f64 {
        if self.max_cache_size_bytes > 0 {
            self.cache_size_bytes as f64 / self.max_cache_size_bytes as f64
        } else {
            0.0
        }
    }

    /// Reports every counter plus the derived rates.
    ///
    /// `avg_object_size` and `eviction_rate` only appear once at least one
    /// lookup has been made.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("byte_hit_rate".to_string(), self.byte_hit_rate());

        metrics.insert(
            "total_bytes_requested".to_string(),
            self.total_bytes_requested as f64,
        );
        metrics.insert(
            "bytes_served_from_cache".to_string(),
            self.bytes_served_from_cache as f64,
        );
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );

        metrics.insert("cache_size_bytes".to_string(), self.cache_size_bytes as f64);
        metrics.insert(
            "max_cache_size_bytes".to_string(),
            self.max_cache_size_bytes as f64,
        );
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        if self.requests > 0 {
            metrics.insert(
                "avg_object_size".to_string(),
                self.total_bytes_requested as f64 / self.requests as f64,
            );
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform access to a cache's metrics.
pub trait CacheMetrics {
    /// Returns every metric the cache tracks, sorted by name.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short identifier of the eviction algorithm, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
