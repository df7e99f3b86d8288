//! # LFU Cache
//!
//! Fixed-capacity cache that evicts the least frequently used entry, with
//! recency breaking ties inside a frequency class. Every operation except
//! `clear` and the diagnostics runs in O(1).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         LfuCache<K, V>                               │
//!   │                                                                      │
//!   │   index: FxHashMap<K, NodeId> ───────────────┐                       │
//!   │                                              ▼                       │
//!   │   ledger: FrequencyLedger<K, V>                                      │
//!   │     [count=1] ◄──► [count=3] ◄──► [count=9]                          │
//!   │      e ◄─► b        a ◄─► d        c                                 │
//!   │            ▲                                                         │
//!   │            └─ victim: tail of the lowest-count bucket                │
//!   │                                                                      │
//!   │   item pool:   capacity slots                                        │
//!   │   bucket pool: capacity + 1 slots                                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(key, value)
//!        │
//!        ├─ key present ─► replace value, count + 1, return old value
//!        │                 (never evicts)
//!        │
//!        ├─ cache full ──► evict tail of lowest bucket, drop it from index
//!        │
//!        └─► new item at count 1, head of the count-1 bucket
//! ```
//!
//! ## Operations
//!
//! | Method                | Access? | Notes                               |
//! |-----------------------|---------|-------------------------------------|
//! | `get`                 | yes     | count + 1                           |
//! | `insert` (existing)   | yes     | value replaced, count + 1           |
//! | `insert` (new)        | -       | count 1, may evict                  |
//! | `increment_frequency` | yes     | like `get` without the value        |
//! | `peek`, `contains`    | no      |                                     |
//! | `peek_lfu`, `pop_lfu` | no      | the next eviction victim            |
//! | `reset_frequency`     | -       | back to count 1                     |
//! | `remove`              | -       |                                     |
//! | `clear`               | -       | O(n), pools keep their storage      |
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//!
//! // "b" has the lowest count and goes first.
//! cache.insert("c", 3);
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), Some(2));
//! assert_eq!(cache.frequency(&"c"), Some(1));
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is single-threaded. [`ConcurrentLfuCache`] (feature
//! `concurrency`) serializes every call through one mutex.

use std::hash::Hash;
use std::mem;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::ledger::{FrequencyLedger, LedgerSnapshot};
use crate::ds::slab::{NodeId, PoolStats};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::lfu::{LfuMetrics, LfuMetricsSnapshot};
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Occupancy of the two node pools behind a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPoolStats {
    pub items: PoolStats,
    pub buckets: PoolStats,
}

impl LedgerPoolStats {
    pub fn is_conserved(&self) -> bool {
        self.items.is_conserved() && self.buckets.is_conserved()
    }
}

/// O(1) LFU cache.
///
/// See the module-level documentation for the layout and eviction rules.
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, NodeId>,
    ledger: FrequencyLedger<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// All node storage and the key index are reserved here; no later
    /// operation allocates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "cache capacity must be greater than zero",
            ));
        }
        debug!(capacity, "created lfu cache");
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ledger: FrequencyLedger::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    /// Returns the value without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let item = *self.index.get(key)?;
        Some(self.ledger.value(item))
    }

    /// Lowest access count present, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        self.ledger.min_count()
    }

    /// Number of distinct access counts currently held.
    pub fn bucket_count(&self) -> usize {
        self.ledger.bucket_count()
    }

    /// Buckets from lowest to highest count, keys most recent first.
    ///
    /// Walks the whole ledger; meant for debugging and tests.
    pub fn ledger_snapshot(&self) -> LedgerSnapshot<K> {
        self.ledger.snapshot()
    }

    pub fn pool_stats(&self) -> LedgerPoolStats {
        LedgerPoolStats {
            items: self.ledger.item_stats(),
            buckets: self.ledger.bucket_stats(),
        }
    }

    /// Verifies the ledger, the key index and pool accounting.
    ///
    /// O(n). Returns the first inconsistency found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.ledger.check_invariants()?;
        if self.ledger.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.ledger.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but ledger holds {} items",
                self.index.len(),
                self.ledger.len()
            )));
        }
        for (key, &item) in &self.index {
            if !self.ledger.contains(item) {
                return Err(InvariantError::new(format!(
                    "index points at free item slot {:?}",
                    item
                )));
            }
            if self.ledger.key(item) != key {
                return Err(InvariantError::new(format!(
                    "item {:?} holds a different key than its index entry",
                    item
                )));
            }
        }
        let buckets = self.ledger.bucket_stats();
        if buckets.in_use > self.ledger.len() {
            return Err(InvariantError::new(format!(
                "{} buckets for {} items",
                buckets.in_use,
                self.ledger.len()
            )));
        }
        Ok(())
    }

    fn take_lfu(&mut self) -> Option<(K, V)> {
        let item = self.ledger.lfu_item()?;
        let (key, value) = self.ledger.remove(item);
        self.index.remove(&key);
        Some((key, value))
    }

    fn evict(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let victim = self
            .ledger
            .lfu_item()
            .expect("full cache has an empty ledger");
        let count = self.ledger.count(victim);
        self.take_lfu();
        trace!(count, len = self.ledger.len(), "evicted lfu entry");

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("lfu cache invariant violated: {}", e);
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&item) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = mem::replace(self.ledger.value_mut(item), value);
            self.ledger.touch(item);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.ledger.len() >= self.capacity {
            self.evict();
        }

        let item = self.ledger.insert(key.clone(), value);
        self.index.insert(key, item);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&item) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.ledger.touch(item);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        Some(self.ledger.value(item))
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.ledger.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(dropped = self.ledger.len(), "cleared lfu cache");
        self.index.clear();
        self.ledger.clear();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let item = self.index.remove(key)?;
        let (_key, value) = self.ledger.remove(item);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let result = self.take_lfu();

        #[cfg(feature = "metrics")]
        if result.is_some() {
            self.metrics.record_pop_lfu_found();
        }

        result
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();

        let item = self.ledger.lfu_item()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();

        Some((self.ledger.key(item), self.ledger.value(item)))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();

        let result = self.index.get(key).map(|&item| self.ledger.count(item));

        #[cfg(feature = "metrics")]
        if result.is_some() {
            (&self.metrics).record_frequency_found();
        }

        result
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_reset_frequency_call();

        let item = *self.index.get(key)?;
        let previous = self.ledger.reset(item);

        #[cfg(feature = "metrics")]
        self.metrics.record_reset_frequency_found();

        Some(previous)
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_increment_frequency_call();

        let item = *self.index.get(key)?;
        let count = self.ledger.touch(item);

        #[cfg(feature = "metrics")]
        self.metrics.record_increment_frequency_found();

        Some(count)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            cache_len: self.ledger.len(),
            capacity: self.capacity,
            bucket_count: self.ledger.bucket_count(),
            min_frequency: self.ledger.min_count().unwrap_or(0),
            ..LfuMetricsSnapshot::from(&self.metrics)
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LFU cache: one [`LfuCache`] behind a `parking_lot::Mutex`.
///
/// Every call takes the lock, including reads, because a hit changes the
/// ledger. Values are cloned out; use [`get_with`](Self::get_with) to work on
/// a value in place. Clones share the same cache.
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::ConcurrentLfuCache;
///
/// let cache = ConcurrentLfuCache::new(16);
/// cache.insert("page", vec![0u8; 4]);
/// assert_eq!(cache.get_with(&"page", |v| v.len()), Some(4));
/// assert_eq!(cache.frequency(&"page"), Some(2));
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LfuCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LfuCache::new(capacity))
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LfuCache::try_new(capacity).map(Self::from_cache)
    }

    pub fn from_cache(cache: LfuCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Gets a cloned value, recording an access.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Records an access and applies `f` to the value under the lock.
    pub fn get_with<F, R>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn pop_lfu(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lfu()
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().frequency(key)
    }

    pub fn increment_frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().increment_frequency(key)
    }

    pub fn reset_frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().reset_frequency(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn ledger_snapshot(&self) -> LedgerSnapshot<K> {
        self.inner.lock().ledger_snapshot()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(cache: &LfuCache<&'static str, i32>) -> Vec<(u64, Vec<&'static str>)> {
        cache.ledger_snapshot().buckets
    }

    mod construction {
        use super::*;

        #[test]
        fn test_zero_capacity_is_rejected() {
            let err = LfuCache::<u32, u32>::try_new(0).unwrap_err();
            assert_eq!(err.message(), "cache capacity must be greater than zero");
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn test_new_panics_on_zero_capacity() {
            let _ = LfuCache::<u32, u32>::new(0);
        }

        #[test]
        fn test_pools_reserved_up_front() {
            let cache = LfuCache::<u32, u32>::new(8);
            let stats = cache.pool_stats();
            assert_eq!(stats.items.capacity, 8);
            assert_eq!(stats.buckets.capacity, 9);
            assert_eq!(stats.items.untouched, 8);
            assert!(stats.is_conserved());
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 8);
        }
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn test_get_counts_access() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.frequency(&"a"), Some(3));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_miss_changes_nothing() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            let before = cache.ledger_snapshot();
            assert_eq!(cache.get(&"zzz"), None);
            assert_eq!(cache.ledger_snapshot(), before);
            assert_eq!(cache.pool_stats().items.in_use, 1);
        }

        #[test]
        fn test_peek_and_contains_do_not_count() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            assert_eq!(cache.peek(&"a"), Some(&1));
            assert!(cache.contains(&"a"));
            assert_eq!(cache.frequency(&"a"), Some(1));
            assert_eq!(cache.peek(&"b"), None);
        }

        #[test]
        fn test_overwrite_counts_as_access_and_returns_old_value() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.insert("a", 10), Some(1));
            assert_eq!(cache.peek(&"a"), Some(&10));
            assert_eq!(cache.frequency(&"a"), Some(2));

            cache.insert("c", 3);
            assert!(!cache.contains(&"b"));
            assert!(cache.contains(&"a"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_update_at_capacity_never_evicts() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("b", 3);
            cache.insert("a", 4);
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.peek(&"a"), Some(&4));
            assert_eq!(cache.peek(&"b"), Some(&3));
        }

        #[test]
        fn test_remove_and_reinsert_starts_at_one() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.get(&"a");
            assert_eq!(cache.remove(&"a"), Some(1));
            assert_eq!(cache.remove(&"a"), None);
            cache.insert("a", 2);
            assert_eq!(cache.frequency(&"a"), Some(1));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_clear_resets_everything() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"a");
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.peek_lfu(), None);
            assert_eq!(cache.min_frequency(), None);
            assert_eq!(cache.pool_stats().items.untouched, 3);

            cache.insert("c", 3);
            assert_eq!(cache.frequency(&"c"), Some(1));
            cache.debug_validate_invariants();
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn test_evicts_lowest_count_then_oldest() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("c", 3);
            cache.get(&"a");
            cache.get(&"b");
            cache.get(&"b");

            cache.insert("d", 4);
            assert!(!cache.contains(&"c"));

            cache.insert("e", 5);
            assert!(!cache.contains(&"d"));
            assert_eq!(
                counts(&cache),
                vec![(1, vec!["e"]), (2, vec!["a"]), (3, vec!["b"])]
            );
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_ties_break_by_least_recent_promotion() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("c", 3);
            cache.get(&"b");
            cache.get(&"a");
            cache.get(&"c");

            // All at count 2; "b" reached it first.
            assert_eq!(cache.peek_lfu(), Some((&"b", &2)));
            assert_eq!(cache.pop_lfu(), Some(("b", 2)));
            assert_eq!(cache.pop_lfu(), Some(("a", 1)));
            assert_eq!(cache.pop_lfu(), Some(("c", 3)));
            assert_eq!(cache.pop_lfu(), None);
        }

        #[test]
        fn test_end_to_end_trace() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.get(&"a"), Some(&1));
            cache.insert("c", 3);

            assert!(!cache.contains(&"b"));
            assert_eq!(counts(&cache), vec![(1, vec!["c"]), (2, vec!["a"])]);

            assert_eq!(cache.get(&"c"), Some(&3));
            assert_eq!(counts(&cache), vec![(2, vec!["c", "a"])]);

            cache.insert("d", 4);
            assert!(!cache.contains(&"a"));
            assert_eq!(counts(&cache), vec![(1, vec!["d"]), (2, vec!["c"])]);
            cache.debug_validate_invariants();
        }

        #[test]
        #[should_panic(expected = "full cache has an empty ledger")]
        fn test_evict_on_empty_ledger_panics() {
            let mut cache = LfuCache::<u8, u8>::new(1);
            cache.evict();
        }

        #[test]
        fn test_evict_drops_victim_from_index_and_ledger() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"b");
            cache.evict();
            assert!(!cache.contains(&"a"));
            assert_eq!(cache.len(), 1);
            assert_eq!(counts(&cache), vec![(2, vec!["b"])]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_single_slot_cache_replaces() {
            let mut cache = LfuCache::new(1);
            cache.insert("only", 1);
            cache.get(&"only");
            cache.insert("next", 2);
            assert_eq!(cache.len(), 1);
            assert!(cache.contains(&"next"));
            assert_eq!(cache.frequency(&"next"), Some(1));
        }
    }

    mod frequency_control {
        use super::*;

        #[test]
        fn test_increment_frequency_matches_get() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            assert_eq!(cache.increment_frequency(&"a"), Some(2));
            assert_eq!(cache.increment_frequency(&"missing"), None);
            assert_eq!(counts(&cache), vec![(2, vec!["a"])]);
        }

        #[test]
        fn test_reset_frequency_returns_previous_count() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            for _ in 0..4 {
                cache.get(&"a");
            }
            cache.get(&"b");

            assert_eq!(cache.reset_frequency(&"a"), Some(5));
            assert_eq!(counts(&cache), vec![(1, vec!["a"]), (2, vec!["b"])]);
            assert_eq!(cache.peek_lfu(), Some((&"a", &1)));
            assert_eq!(cache.reset_frequency(&"missing"), None);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_buckets_never_outnumber_items() {
            let mut cache = LfuCache::new(4);
            for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
                cache.insert(key, i as i32);
                for _ in 0..i {
                    cache.get(&key);
                }
            }
            assert_eq!(cache.bucket_count(), 4);
            cache.remove(&"c");
            assert_eq!(cache.bucket_count(), 3);
            assert!(cache.pool_stats().buckets.in_use <= cache.len());
            cache.debug_validate_invariants();
        }
    }

    #[cfg(feature = "concurrency")]
    mod thread_bounds {
        use super::*;

        fn assert_send<T: Send>() {}
        fn assert_concurrent<C: ConcurrentCache>() {}

        #[test]
        fn test_cache_is_send_and_wrapper_is_concurrent() {
            assert_send::<LfuCache<u64, String>>();
            assert_concurrent::<ConcurrentLfuCache<u64, String>>();
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_metrics_track_hits_and_evictions() {
            let mut cache = LfuCache::new(1);
            cache.insert("a", 1);
            cache.get(&"a");
            cache.get(&"x");
            cache.insert("b", 2);
            cache.peek_lfu();

            let snapshot = cache.metrics_snapshot();
            assert_eq!(snapshot.get_hits, 1);
            assert_eq!(snapshot.get_misses, 1);
            assert_eq!(snapshot.insert_new, 2);
            assert_eq!(snapshot.evicted_entries, 1);
            assert_eq!(snapshot.peek_lfu_found, 1);
            assert_eq!(snapshot.cache_len, 1);
            assert_eq!(snapshot.min_frequency, 1);

            cache.reset_metrics();
            assert_eq!(cache.metrics_snapshot().get_calls, 0);
        }
    }
}
