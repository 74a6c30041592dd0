//! Error types returned by the cache.
//!
//! - [`KeyNotFound`]: returned by [`LruCache::try_get`](crate::LruCache::try_get)
//!   when the requested key is absent. Carries the key rendered as a string.
//! - [`InvalidCapacity`]: returned by fallible constructors when asked for a
//!   cache that can hold zero entries.
//!
//! Both implement [`core::fmt::Display`]. With the `std` feature enabled they
//! also implement `std::error::Error`.
//!
//! ```
//! use lru_slab::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache: LruCache<u32, &str> = LruCache::new(NonZeroUsize::new(4).unwrap());
//! let err = cache.try_get(&7).unwrap_err();
//! assert_eq!(err.to_string(), "KeyNotFound: 7");
//! assert_eq!(err.key(), "7");
//! ```

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// The requested key is not present in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotFound {
    key: String,
}

impl KeyNotFound {
    /// Creates a new `KeyNotFound` for the given stringified key.
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the missing key as it was rendered when the lookup failed.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyNotFound: {}", self.key)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeyNotFound {}

/// A cache was requested with a capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidCapacity;

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InvalidCapacity: capacity must be greater than zero")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCapacity {}
