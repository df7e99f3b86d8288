// ==============================================
// DIFFERENTIAL TESTS AGAINST AN ORDERED-MAP MODEL
// ==============================================
//
// The model ranks entries by `(count, tick)` in a BTreeMap, where `tick` is
// the logical time the entry last changed count or was reset. The first key
// of the map is the eviction victim. It is slow but obviously correct, so the
// slab-backed cache must agree with it on every observable result.

use std::collections::{BTreeMap, HashMap};

use lfukit::policy::lfu::LfuCache;
use lfukit::traits::{CoreCache, LfuCacheTrait, MutableCache};
use proptest::prelude::*;

struct ModelEntry {
    count: u64,
    tick: u64,
    value: u32,
}

struct OrderedLfu {
    capacity: usize,
    tick: u64,
    entries: HashMap<u8, ModelEntry>,
    ranking: BTreeMap<(u64, u64), u8>,
}

impl OrderedLfu {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::new(),
            ranking: BTreeMap::new(),
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn rerank(&mut self, key: u8, count: u64) {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(&key).unwrap();
        self.ranking.remove(&(entry.count, entry.tick));
        entry.count = count;
        entry.tick = tick;
        self.ranking.insert((count, tick), key);
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let count = self.entries.get(&key)?.count;
        self.rerank(key, count + 1);
        Some(self.entries[&key].value)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<u32> {
        if let Some(entry) = self.entries.get_mut(&key) {
            let previous = std::mem::replace(&mut entry.value, value);
            let count = entry.count;
            self.rerank(key, count + 1);
            return Some(previous);
        }
        if self.entries.len() >= self.capacity {
            self.pop();
        }
        let tick = self.next_tick();
        self.entries.insert(
            key,
            ModelEntry {
                count: 1,
                tick,
                value,
            },
        );
        self.ranking.insert((1, tick), key);
        None
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        let entry = self.entries.remove(&key)?;
        self.ranking.remove(&(entry.count, entry.tick));
        Some(entry.value)
    }

    fn pop(&mut self) -> Option<(u8, u32)> {
        let (_, key) = self.ranking.pop_first()?;
        let entry = self.entries.remove(&key).unwrap();
        Some((key, entry.value))
    }

    fn peek(&self) -> Option<u8> {
        self.ranking.first_key_value().map(|(_, key)| *key)
    }

    fn reset(&mut self, key: u8) -> Option<u64> {
        let previous = self.entries.get(&key)?.count;
        self.rerank(key, 1);
        Some(previous)
    }

    fn frequency(&self, key: u8) -> Option<u64> {
        self.entries.get(&key).map(|entry| entry.count)
    }
}

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u32),
    Get(u8),
    Remove(u8),
    Pop,
    Reset(u8),
    Increment(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..20, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        6 => (0u8..20).prop_map(Op::Get),
        1 => (0u8..20).prop_map(Op::Remove),
        1 => Just(Op::Pop),
        1 => (0u8..20).prop_map(Op::Reset),
        2 => (0u8..20).prop_map(Op::Increment),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_ordered_model(
        capacity in 1usize..9,
        ops in prop::collection::vec(op_strategy(), 0..400)
    ) {
        let mut cache: LfuCache<u8, u32> = LfuCache::new(capacity);
        let mut model = OrderedLfu::new(capacity);

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.insert(k, v), model.put(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
                Op::Pop => {
                    prop_assert_eq!(cache.pop_lfu(), model.pop());
                },
                Op::Reset(k) => {
                    prop_assert_eq!(cache.reset_frequency(&k), model.reset(k));
                },
                Op::Increment(k) => {
                    let expected = model.get(k).map(|_| model.frequency(k).unwrap());
                    prop_assert_eq!(cache.increment_frequency(&k), expected);
                },
            }

            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert_eq!(cache.peek_lfu().map(|(k, _)| *k), model.peek());
            for key in 0u8..20 {
                prop_assert_eq!(cache.frequency(&key), model.frequency(key));
            }
        }
    }
}

#[test]
fn model_and_cache_agree_on_scan_resistance() {
    let mut cache: LfuCache<u8, u32> = LfuCache::new(4);
    let mut model = OrderedLfu::new(4);

    for hot in 0u8..2 {
        for _ in 0..5 {
            cache.insert(hot, u32::from(hot));
            model.put(hot, u32::from(hot));
        }
    }
    for cold in 10u8..40 {
        assert_eq!(cache.insert(cold, 0), model.put(cold, 0));
    }

    assert!(cache.contains(&0));
    assert!(cache.contains(&1));
    assert_eq!(cache.frequency(&0), model.frequency(0));
    assert_eq!(cache.peek_lfu().map(|(k, _)| *k), model.peek());
}
