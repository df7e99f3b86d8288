//! Frequency ledger: the sorted chain of access-count buckets behind the LFU
//! cache.
//!
//! Buckets and items are both nodes in fixed-capacity slabs. The ledger is a
//! [`LinkedList`] of buckets ordered by strictly increasing count; each bucket
//! owns a [`LinkedList`] of items that have been accessed exactly `count`
//! times. Items keep a back-reference to their bucket so they can be promoted
//! without searching.
//!
//! ## Architecture
//!
//! ```text
//!   ledger (buckets, ascending count)
//!
//!   head ─► [count=1] ◄──► [count=2] ◄──► [count=5] ◄── tail
//!              │               │               │
//!              ▼               ▼               ▼
//!           d ◄─► c            a               b
//!           MRU   LRU (victim)
//!
//!   item { key, value, bucket ─────► owning bucket node }
//! ```
//!
//! ## Touch Flow (count n → n+1)
//!
//! ```text
//!   1. Unlink the item from bucket(n)
//!   2. Target = successor of bucket(n) if its count is n+1
//!      else, if bucket(n) is now empty, bump bucket(n) to n+1 in place
//!      else, allocate bucket(n+1) and link it right after bucket(n)
//!   3. Release bucket(n) if it is empty and was not reused
//!   4. Push the item at the head of the target
//! ```
//!
//! Every new bucket is linked at a position fixed by the structure: right
//! after its source bucket on promotion, or at the ledger front for count 1.
//! Nothing between n and n+1 can exist, so the ledger stays sorted without a
//! search and every operation is O(1).
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                   |
//! |-------------|------|-----------------------------------------|
//! | `insert`    | O(1) | New item at count 1, head of its bucket |
//! | `touch`     | O(1) | Promote to count + 1                    |
//! | `reset`     | O(1) | Demote to count 1                       |
//! | `remove`    | O(1) | Unlink, drop empty bucket               |
//! | `lfu_item`  | O(1) | Tail of the head bucket                 |
//! | `snapshot`  | O(n) | Diagnostic only                         |

use std::fmt;

use crate::ds::list::LinkedList;
use crate::ds::slab::{NodeId, PoolStats, SlabAllocator};
use crate::error::InvariantError;

/// Spare bucket slots beyond one per item.
pub const BUCKET_HEADROOM: usize = 1;

const MISSING_BUCKET: &str = "ledger bucket missing";
const MISSING_ITEM: &str = "ledger item missing";

#[derive(Debug)]
struct Item<K, V> {
    key: K,
    value: V,
    bucket: NodeId,
}

#[derive(Debug)]
struct Bucket<K, V> {
    count: u64,
    items: LinkedList<Item<K, V>>,
}

impl<K, V> Bucket<K, V> {
    fn new(count: u64) -> Self {
        Self {
            count,
            items: LinkedList::new(),
        }
    }
}

/// Count-ordered buckets of items, with storage drawn from two fixed pools.
///
/// The ledger does not index keys; callers keep the [`NodeId`] returned by
/// [`insert`](Self::insert) and pass it back to the other operations.
#[derive(Debug)]
pub struct FrequencyLedger<K, V> {
    buckets: LinkedList<Bucket<K, V>>,
    bucket_pool: SlabAllocator<Bucket<K, V>>,
    item_pool: SlabAllocator<Item<K, V>>,
}

impl<K, V> FrequencyLedger<K, V> {
    /// Reserves `capacity` item slots and `capacity + BUCKET_HEADROOM` bucket
    /// slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: LinkedList::new(),
            bucket_pool: SlabAllocator::with_capacity(capacity + BUCKET_HEADROOM),
            item_pool: SlabAllocator::with_capacity(capacity),
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.item_pool.in_use()
    }

    pub fn is_empty(&self) -> bool {
        self.item_pool.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.item_pool.capacity()
    }

    /// Number of buckets currently in the ledger.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Lowest count present, if any.
    pub fn min_count(&self) -> Option<u64> {
        self.buckets.head().map(|id| self.bucket(id).count)
    }

    pub fn item_stats(&self) -> PoolStats {
        self.item_pool.stats()
    }

    pub fn bucket_stats(&self) -> PoolStats {
        self.bucket_pool.stats()
    }

    /// Inserts a new item at count 1 and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if the item pool is full; callers evict first.
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        let bucket = self.count_one_bucket();
        let item = self.item_pool.acquire(Item { key, value, bucket });
        self.link_front(bucket, item);
        item
    }

    /// Records one access to `item` and returns its new count.
    ///
    /// At `u64::MAX` the count saturates and the item only moves to the head
    /// of its bucket.
    pub fn touch(&mut self, item: NodeId) -> u64 {
        let source = self.item(item).bucket;
        let count = self.bucket(source).count;
        if count == u64::MAX {
            self.bucket_pool
                .get_mut(source)
                .expect(MISSING_BUCKET)
                .items
                .move_to_front(&mut self.item_pool, item);
            return count;
        }

        let next_count = count + 1;
        let successor = self
            .buckets
            .next(&self.bucket_pool, source)
            .filter(|&next| self.bucket(next).count == next_count);

        self.unlink(source, item);
        let source_empty = self.bucket(source).items.is_empty();

        let target = match successor {
            Some(next) => {
                if source_empty {
                    self.release_bucket(source);
                }
                next
            },
            None if source_empty => {
                self.bucket_mut(source).count = next_count;
                source
            },
            None => {
                let id = self.bucket_pool.acquire(Bucket::new(next_count));
                self.buckets.insert_after(&mut self.bucket_pool, source, id);
                id
            },
        };

        self.link_front(target, item);
        next_count
    }

    /// Moves `item` back to count 1 and returns its previous count.
    pub fn reset(&mut self, item: NodeId) -> u64 {
        let source = self.item(item).bucket;
        let previous = self.bucket(source).count;
        if previous == 1 {
            self.bucket_pool
                .get_mut(source)
                .expect(MISSING_BUCKET)
                .items
                .move_to_front(&mut self.item_pool, item);
            return previous;
        }

        self.detach(item);
        let target = self.count_one_bucket();
        self.link_front(target, item);
        previous
    }

    /// Removes `item` from the ledger and returns its key and value.
    pub fn remove(&mut self, item: NodeId) -> (K, V) {
        self.detach(item);
        let Item { key, value, .. } = self.item_pool.release(item);
        (key, value)
    }

    /// The eviction victim: least-recently-promoted item of the lowest count.
    pub fn lfu_item(&self) -> Option<NodeId> {
        let head = self.buckets.head()?;
        self.bucket(head).items.tail()
    }

    /// Returns `true` if `item` is a live item of this ledger.
    pub fn contains(&self, item: NodeId) -> bool {
        self.item_pool.contains(item)
    }

    pub fn count(&self, item: NodeId) -> u64 {
        self.bucket(self.item(item).bucket).count
    }

    pub fn key(&self, item: NodeId) -> &K {
        &self.item(item).key
    }

    pub fn value(&self, item: NodeId) -> &V {
        &self.item(item).value
    }

    pub fn value_mut(&mut self, item: NodeId) -> &mut V {
        &mut self.item_mut(item).value
    }

    /// Drops every bucket and item; both pools keep their storage.
    pub fn clear(&mut self) {
        self.buckets = LinkedList::new();
        self.bucket_pool.clear();
        self.item_pool.clear();
    }

    /// Buckets from lowest to highest count.
    pub fn iter_buckets(&self) -> impl Iterator<Item = BucketView<'_, K, V>> + '_ {
        self.buckets.iter(&self.bucket_pool).map(|(_, bucket)| BucketView {
            count: bucket.count,
            items: &bucket.items,
            pool: &self.item_pool,
        })
    }

    /// Owned copy of the ledger layout, for debugging and tests.
    pub fn snapshot(&self) -> LedgerSnapshot<K>
    where
        K: Clone,
    {
        LedgerSnapshot {
            buckets: self
                .iter_buckets()
                .map(|bucket| (bucket.count(), bucket.iter().map(|(k, _)| k.clone()).collect()))
                .collect(),
        }
    }

    /// Verifies ordering, back-references, list links and pool accounting.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut previous_count = 0u64;
        let mut bucket_total = 0usize;
        let mut item_total = 0usize;
        let mut prev_bucket = None;

        let mut current = self.buckets.head();
        while let Some(bucket_id) = current {
            let bucket = self.bucket_pool.get(bucket_id).ok_or_else(|| {
                InvariantError::new(format!("ledger links free bucket slot {:?}", bucket_id))
            })?;
            if self.bucket_pool.prev(bucket_id) != prev_bucket {
                return Err(InvariantError::new(format!(
                    "bucket {} has an inconsistent prev link",
                    bucket.count
                )));
            }
            if bucket.count <= previous_count {
                return Err(InvariantError::new(format!(
                    "bucket counts not strictly increasing: {} after {}",
                    bucket.count, previous_count
                )));
            }
            if bucket.items.is_empty() {
                return Err(InvariantError::new(format!(
                    "bucket {} is empty",
                    bucket.count
                )));
            }

            let mut seen = 0usize;
            let mut prev_item = None;
            let mut item_cursor = bucket.items.head();
            while let Some(item_id) = item_cursor {
                let item = self.item_pool.get(item_id).ok_or_else(|| {
                    InvariantError::new(format!(
                        "bucket {} links free item slot {:?}",
                        bucket.count, item_id
                    ))
                })?;
                if item.bucket != bucket_id {
                    return Err(InvariantError::new(format!(
                        "item {:?} in bucket {} points at another bucket",
                        item_id, bucket.count
                    )));
                }
                if self.item_pool.prev(item_id) != prev_item {
                    return Err(InvariantError::new(format!(
                        "item {:?} in bucket {} has an inconsistent prev link",
                        item_id, bucket.count
                    )));
                }
                seen += 1;
                if seen > bucket.items.len() {
                    return Err(InvariantError::new(format!(
                        "bucket {} item list is longer than its length {}",
                        bucket.count,
                        bucket.items.len()
                    )));
                }
                prev_item = Some(item_id);
                item_cursor = self.item_pool.next(item_id);
            }
            if seen != bucket.items.len() || bucket.items.tail() != prev_item {
                return Err(InvariantError::new(format!(
                    "bucket {} walked {} items but records {}",
                    bucket.count,
                    seen,
                    bucket.items.len()
                )));
            }

            item_total += seen;
            bucket_total += 1;
            previous_count = bucket.count;
            prev_bucket = Some(bucket_id);
            current = self.bucket_pool.next(bucket_id);
        }

        if self.buckets.tail() != prev_bucket || bucket_total != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "ledger walked {} buckets but records {}",
                bucket_total,
                self.buckets.len()
            )));
        }
        if bucket_total != self.bucket_pool.in_use() {
            return Err(InvariantError::new(format!(
                "{} buckets linked but {} bucket slots in use",
                bucket_total,
                self.bucket_pool.in_use()
            )));
        }
        if item_total != self.item_pool.in_use() {
            return Err(InvariantError::new(format!(
                "{} items linked but {} item slots in use",
                item_total,
                self.item_pool.in_use()
            )));
        }
        for (name, stats) in [("item", self.item_stats()), ("bucket", self.bucket_stats())] {
            if !stats.is_conserved() {
                return Err(InvariantError::new(format!(
                    "{} pool leaks slots: {:?}",
                    name, stats
                )));
            }
        }
        Ok(())
    }

    /// Head bucket if it holds count 1, otherwise a fresh count-1 bucket
    /// linked at the front.
    fn count_one_bucket(&mut self) -> NodeId {
        match self.buckets.head() {
            Some(head) if self.bucket(head).count == 1 => head,
            _ => {
                let id = self.bucket_pool.acquire(Bucket::new(1));
                self.buckets.push_front(&mut self.bucket_pool, id);
                id
            },
        }
    }

    fn link_front(&mut self, bucket: NodeId, item: NodeId) {
        self.bucket_pool
            .get_mut(bucket)
            .expect(MISSING_BUCKET)
            .items
            .push_front(&mut self.item_pool, item);
        self.item_mut(item).bucket = bucket;
    }

    fn unlink(&mut self, bucket: NodeId, item: NodeId) {
        self.bucket_pool
            .get_mut(bucket)
            .expect(MISSING_BUCKET)
            .items
            .remove(&mut self.item_pool, item);
    }

    /// Unlinks `item` and releases its bucket if that leaves it empty.
    fn detach(&mut self, item: NodeId) {
        let source = self.item(item).bucket;
        self.unlink(source, item);
        if self.bucket(source).items.is_empty() {
            self.release_bucket(source);
        }
    }

    fn release_bucket(&mut self, bucket: NodeId) {
        self.buckets.remove(&mut self.bucket_pool, bucket);
        let released = self.bucket_pool.release(bucket);
        debug_assert!(released.items.is_empty());
    }

    fn bucket(&self, id: NodeId) -> &Bucket<K, V> {
        self.bucket_pool.get(id).expect(MISSING_BUCKET)
    }

    fn bucket_mut(&mut self, id: NodeId) -> &mut Bucket<K, V> {
        self.bucket_pool.get_mut(id).expect(MISSING_BUCKET)
    }

    fn item(&self, id: NodeId) -> &Item<K, V> {
        self.item_pool.get(id).expect(MISSING_ITEM)
    }

    fn item_mut(&mut self, id: NodeId) -> &mut Item<K, V> {
        self.item_pool.get_mut(id).expect(MISSING_ITEM)
    }
}

/// Read-only view of one bucket.
pub struct BucketView<'a, K, V> {
    count: u64,
    items: &'a LinkedList<Item<K, V>>,
    pool: &'a SlabAllocator<Item<K, V>>,
}

impl<'a, K, V> BucketView<'a, K, V> {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items from most to least recently promoted.
    pub fn iter(&self) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        self.items
            .iter(self.pool)
            .map(|(_, item)| (&item.key, &item.value))
    }
}

/// Owned ledger layout: `(count, keys most-recent first)` per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerSnapshot<K> {
    pub buckets: Vec<(u64, Vec<K>)>,
}

impl<K> LedgerSnapshot<K> {
    /// Bucket counts from head to tail.
    pub fn counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|(count, _)| *count).collect()
    }

    /// Count of the bucket holding `key`, if present.
    pub fn count_of(&self, key: &K) -> Option<u64>
    where
        K: PartialEq,
    {
        self.buckets
            .iter()
            .find(|(_, keys)| keys.contains(key))
            .map(|(count, _)| *count)
    }
}

impl<K: fmt::Debug> fmt::Display for LedgerSnapshot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (count, keys) in &self.buckets {
            write!(f, "{:>4} |", count)?;
            for key in keys {
                write!(f, " {:?}", key)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
