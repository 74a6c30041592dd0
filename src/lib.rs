#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How It Works
//!
//! ```text
//!  index: HashMap<K, SlotId>          recency list, stored in a slab
//!
//!   "apple"  -> slot 2               slot 0  ("cherry", 3)   MRU
//!   "banana" -> slot 1                 │
//!   "cherry" -> slot 0               slot 2  ("apple", 1)
//!                                      │
//!                                    slot 1  ("banana", 2)   LRU
//! ```
//!
//! A lookup hashes the key, follows the slot handle and relinks that slot at
//! the front. An insert that overflows the capacity unlinks the back slot and
//! erases its key from the index. Freed slots are reused by later inserts.
//!
//! ## Quick Reference
//!
//! | Operation | Method | Promotes | Cost |
//! |-----------|--------|----------|------|
//! | Insert / overwrite | [`LruCache::put`] | yes | O(1) |
//! | Lookup | [`LruCache::get`], [`LruCache::get_mut`] | yes | O(1) |
//! | Lookup or error | [`LruCache::try_get`] | yes | O(1) |
//! | Inspect | [`LruCache::peek`], [`LruCache::contains`] | no | O(1) |
//! | Remove | [`LruCache::remove`] | n/a | O(1) |
//! | Clear | [`LruCache::clear`] | n/a | O(n) |
//! | Iterate MRU first | [`LruCache::iter`], [`LruCache::iter_mut`] | no | O(n) |
//!
//! ## Code Examples
//!
//! ```rust
//! use lru_slab::LruCache;
//! use lru_slab::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//!     max_size: 1024,
//! };
//! let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, ["c", "a"]);
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the LRU cache and its iterators
//! - [`config`]: configuration structure
//! - [`error`]: error types
//! - [`metrics`]: metrics collection for cache performance monitoring

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Doubly linked recency list stored in a slab.
///
/// Internal infrastructure: entries are addressed by stable slot handles that
/// the cache keeps in its index.
pub(crate) mod list;

/// Cache configuration.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Cache metrics system.
///
/// Counters for hits, misses, evictions and bytes moved, reported through the
/// [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

pub use error::{InvalidCapacity, KeyNotFound};
pub use lru::LruCache;
