//! Builder for LFU caches.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::CacheBuilder;
//! use lfukit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::new(0).try_build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lfu::ConcurrentLfuCache;
use crate::policy::lfu::LfuCache;

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Replaces the capacity set so far.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the cache, returning an error for an invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<LfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LfuCache::try_new(self.capacity)
    }

    /// Build a mutex-guarded cache that can be shared across threads.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentLfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        ConcurrentLfuCache::try_new(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{CoreCache, LfuCacheTrait};

    #[test]
    fn test_build_basic_ops() {
        let mut cache = CacheBuilder::new(10).build::<u64, String>();

        assert_eq!(cache.insert(1, "one".to_string()), None);
        assert_eq!(cache.insert(2, "two".to_string()), None);
        assert_eq!(cache.get(&1), Some(&"one".to_string()));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 10);

        assert_eq!(cache.insert(1, "ONE".to_string()), Some("one".to_string()));
        assert_eq!(cache.frequency(&1), Some(3));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_try_build_rejects_zero_capacity() {
        let err = CacheBuilder::new(0).try_build::<u64, u64>().unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn test_capacity_override() {
        let cache = CacheBuilder::new(0).capacity(4).build::<u8, u8>();
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "greater than zero")]
    fn test_build_panics_on_zero_capacity() {
        let _ = CacheBuilder::new(0).build::<u8, u8>();
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn test_build_concurrent() {
        let cache = CacheBuilder::new(2).try_build_concurrent::<u8, u8>().unwrap();
        cache.insert(1, 1);
        assert_eq!(cache.get(&1), Some(1));
    }
}
