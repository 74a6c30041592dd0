//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity key-value cache that evicts the least recently used entry
//! when a new key would push it over capacity.
//!
//! # Algorithm
//!
//! Entries live in a recency list: the front is the most recently used entry,
//! the back is the least recently used one. A hash index maps each key to the
//! slot its entry occupies in the list.
//!
//! - `put` of a new key links a fresh entry at the front and, if the cache now
//!   holds more than `cap()` entries, drops the entry at the back. Exactly one
//!   entry is evicted per overflowing `put`.
//! - `put` of a key already cached overwrites its value and moves it to the
//!   front, whether or not the value changed. Nothing is evicted.
//! - `get`, `get_mut` and `try_get` move a hit to the front.
//! - `peek`, `contains` and iteration leave the order untouched.
//!
//! The list is stored in a slab addressed by integer slot handles, so moving or
//! unlinking an entry never invalidates the handle the index holds for any
//! other entry.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - Each entry stores its key twice (list and index) plus two link indices
//!
//! # Thread Safety
//!
//! Lookups reorder the list, so even `get` needs `&mut self`. The cache is
//! `Send` and `Sync` when its keys, values and hasher are; to share one
//! between threads wrap it in a lock such as `Mutex`.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::{InvalidCapacity, KeyNotFound};
use crate::list::{self, List, SlotId};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Fixed bookkeeping cost added to every entry's size estimate.
const ENTRY_OVERHEAD_BYTES: u64 = 64;

/// Upper bound on the entries reserved up front; larger caches grow on demand.
const MAX_PREALLOC_ENTRIES: usize = 1024;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for inserting,
/// retrieving and removing entries. When a new key arrives while the cache is
/// full, the least recently used entry is evicted to make room.
///
/// # Examples
///
/// ```
/// use lru_slab::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Clone)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, SlotId, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates an empty cache from a plain `usize` capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    ///
    /// ```
    /// use lru_slab::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// let cache = LruCache::<u32, u32>::try_new(8).unwrap();
    /// assert_eq!(cache.cap().get(), 8);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, InvalidCapacity> {
        let cap = NonZeroUsize::new(capacity).ok_or(InvalidCapacity)?;
        Ok(LruCache::new(cap))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an empty cache with the given capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::with_config(LruCacheConfig::new(cap), hash_builder)
    }

    /// Creates an empty cache from `config`.
    ///
    /// Uses `hasher` for the index when given, otherwise `S::default()`.
    ///
    /// ```
    /// use lru_slab::config::LruCacheConfig;
    /// use lru_slab::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    ///     max_size: 64 * 1024,
    /// };
    /// let cache: LruCache<&str, i32> = LruCache::init(config, None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_config(config, hasher.unwrap_or_default())
    }

    fn with_config(config: LruCacheConfig, hash_builder: S) -> Self {
        // One spare slot for the entry that triggers an eviction.
        let reserve = config
            .capacity()
            .get()
            .saturating_add(1)
            .min(MAX_PREALLOC_ENTRIES);
        LruCache {
            config,
            list: List::with_capacity(reserve),
            map: HashMap::with_capacity_and_hasher(reserve, hash_builder),
            metrics: LruCacheMetrics::new(config.max_size),
        }
    }

    /// Returns the maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    /// Returns the number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the raw counters behind [`CacheMetrics::metrics`].
    #[inline]
    pub fn stats(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    fn estimate_object_size() -> u64 {
        (mem::size_of::<K>() + mem::size_of::<V>()) as u64 + ENTRY_OVERHEAD_BYTES
    }

    /// Finds `key`, promotes it to most recently used and records the outcome.
    fn touch<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let object_size = Self::estimate_object_size();
        match self.map.get(key).copied() {
            Some(id) => {
                self.list.move_to_front(id);
                self.metrics.core.record_hit(object_size);
                Some(id)
            }
            None => {
                self.metrics.core.record_miss(object_size);
                None
            }
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Returns `None` if the key is not cached.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        self.list.get(id).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        self.list.get_mut(id).map(|(_, v)| v)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] carrying the key's `Display` rendering if the
    /// key is not cached.
    ///
    /// ```
    /// use lru_slab::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = LruCache::new(NonZeroUsize::new(5).unwrap());
    /// cache.put(1, 100);
    /// assert_eq!(cache.try_get(&1), Ok(&100));
    /// assert_eq!(cache.try_get(&0).unwrap_err().to_string(), "KeyNotFound: 0");
    /// ```
    pub fn try_get<Q>(&mut self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + fmt::Display,
    {
        self.get(key).ok_or_else(|| KeyNotFound::new(key.to_string()))
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key).copied()?;
        self.list.get(id).map(|(_, v)| v)
    }

    /// Returns true if `key` is cached. Does not change its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the least recently used entry, the next one to be evicted.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    /// Returns the most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|(k, v)| (k, v))
    }

    /// Removes `key` and returns its value.
    ///
    /// Removing a key that is not cached does nothing and returns `None`.
    /// An explicit removal is not an eviction and is counted separately in
    /// the metrics.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        let (_, value) = self.list.remove(id)?;
        self.metrics.record_removal(Self::estimate_object_size());
        Some(value)
    }

    /// Drops every entry. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.metrics.record_clear();
    }

    /// Iterates entries from most to least recently used.
    ///
    /// Iterating does not change the recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterates entries from most to least recently used, with mutable access
    /// to the values. Does not change the recency order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.list.iter_mut(),
        }
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction(Self::estimate_object_size());
        Some((key, value))
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts `value` under `key` and marks it most recently used.
    ///
    /// If the key is already cached its value is replaced in place and nothing
    /// is evicted. Otherwise, if the new entry takes the cache over capacity,
    /// the least recently used entry is evicted and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        let object_size = Self::estimate_object_size();

        if let Some(&id) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.1 = value;
            }
            self.list.move_to_front(id);
            self.metrics.record_update(object_size);
            return None;
        }

        let id = self.list.push_front((key.clone(), value));
        self.map.insert(key, id);
        self.metrics.core.record_insertion(object_size);

        if self.map.len() > self.cap().get() {
            return self.evict_lru();
        }
        None
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity())
            .field("len", &self.list.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> Extend<(K, V)> for LruCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a mut LruCache<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for LruCache<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self.list }
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over `(&K, &mut V)` from most to least recently used.
///
/// Created by [`LruCache::iter_mut`].
pub struct IterMut<'a, K, V> {
    inner: list::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.0, &mut entry.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.0, &mut entry.1))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Owning iterator over `(K, V)` from most to least recently used.
///
/// Created by calling `into_iter` on an [`LruCache`].
pub struct IntoIter<K, V> {
    list: List<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.list.len())
            .finish()
    }
}
