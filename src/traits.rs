//! Cache trait hierarchy.
//!
//! ```text
//!   CoreCache<K, V>          insert / get / contains / len / capacity / clear
//!         │
//!         ▼
//!   MutableCache<K, V>       remove / remove_batch
//!         │
//!         ▼
//!   LfuCacheTrait<K, V>      pop_lfu / peek_lfu / frequency /
//!                            reset_frequency / increment_frequency
//!
//!   ConcurrentCache          marker: Send + Sync, safe to share by reference
//! ```
//!
//! `get` is the only read that counts as an access; `contains`, `len`,
//! `frequency` and `peek_lfu` leave eviction order untouched. A miss is a
//! plain `None`.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, LfuCacheTrait};
//!
//! fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.to_string());
//!     }
//! }
//!
//! let mut cache = LfuCache::new(4);
//! warm(&mut cache, &[(1, "one"), (2, "two")]);
//! cache.get(&1);
//! assert_eq!(cache.frequency(&1), Some(2));
//! ```

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the key is new and the cache is full, one entry is evicted first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value and records the access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without recording an access.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support removal of arbitrary keys.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// LFU-specific operations.
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::LfuCache;
/// use lfukit::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.get(&2);
///
/// // Key 1 is the victim: lowest count.
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
/// assert_eq!(cache.pop_lfu(), Some((1, "first")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the entry that would be evicted next.
    ///
    /// That is the least recently promoted entry among those with the lowest
    /// access count.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the entry that would be evicted next, without removing it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access count of a key.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Moves a key back to count 1, returning its previous count.
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Records an access without reading the value, returning the new count.
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}

/// Marker for caches that are safe to share across threads by reference.
pub trait ConcurrentCache: Send + Sync {}
