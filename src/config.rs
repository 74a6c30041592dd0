//! Cache Configuration
//!
//! [`LruCacheConfig`] describes a cache up front with public fields, so a
//! configuration can be built as a plain struct literal, stored, copied and
//! handed to [`LruCache::init`](crate::LruCache::init).
//!
//! # Sizing
//!
//! - **`capacity`**: the maximum number of entries. This is the only limit the
//!   cache enforces; inserting a new key into a full cache evicts the least
//!   recently used entry.
//! - **`max_size`**: the byte budget the metrics report utilization against.
//!   Entry sizes are estimated from `size_of::<K>() + size_of::<V>()` plus a
//!   fixed per-entry overhead, so a reasonable budget is roughly
//!   `capacity * (size_of::<K>() + size_of::<V>() + 64)`.
//!
//! # Examples
//!
//! ```
//! use lru_slab::config::LruCacheConfig;
//! use lru_slab::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//!     max_size: 10 * 1024 * 1024,
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//!
//! // Capacity coming from user input
//! assert!(LruCacheConfig::try_new(0).is_err());
//! ```

use crate::error::InvalidCapacity;
use core::fmt;
use core::num::NonZeroUsize;

/// Metrics budget assumed per entry when none is given.
const DEFAULT_BYTES_PER_ENTRY: u64 = 1024;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `capacity`: maximum number of key-value pairs held at once.
/// - `max_size`: byte budget used by the `cache_utilization` metric. It does
///   not cause evictions.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
    /// Byte budget reported as `max_cache_size_bytes` in the metrics.
    pub max_size: u64,
}

impl LruCacheConfig {
    /// Creates a configuration for `capacity` entries with a metrics budget of
    /// 1 KiB per entry.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            max_size: (capacity.get() as u64).saturating_mul(DEFAULT_BYTES_PER_ENTRY),
        }
    }

    /// Like [`new`](Self::new) but takes a plain `usize`, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, InvalidCapacity> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(InvalidCapacity)
    }

    /// Returns the configured entry capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .field("max_size", &self.max_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
            max_size: 10 * 1024 * 1024,
        };
        assert_eq!(config.capacity().get(), 1000);
        assert_eq!(config.max_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_lru_config_new_derives_budget() {
        let config = LruCacheConfig::new(NonZeroUsize::new(8).unwrap());
        assert_eq!(config.capacity.get(), 8);
        assert_eq!(config.max_size, 8 * 1024);
    }

    #[test]
    fn test_lru_config_try_new() {
        assert_eq!(LruCacheConfig::try_new(0), Err(InvalidCapacity));
        let config = LruCacheConfig::try_new(3).unwrap();
        assert_eq!(config.capacity.get(), 3);
    }
}
