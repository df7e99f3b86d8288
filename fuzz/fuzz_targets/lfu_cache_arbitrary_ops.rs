#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::lfu::LfuCache;
use lfukit::traits::{CoreCache, LfuCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences on LfuCache
//
// First byte picks the capacity; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 32) + 1;
    let mut cache: LfuCache<u8, u32> = LfuCache::new(capacity);

    for pair in rest.chunks_exact(2) {
        let op = pair[0] % 9;
        let key = pair[1];

        match op {
            0 | 1 => {
                let had = cache.contains(&key);
                let before = cache.frequency(&key);
                let previous = cache.insert(key, u32::from(key));
                assert_eq!(previous.is_some(), had);
                if let Some(count) = before {
                    assert_eq!(cache.frequency(&key), Some(count.saturating_add(1)));
                } else {
                    assert_eq!(cache.frequency(&key), Some(1));
                }
            }
            2 | 3 => {
                let before = cache.frequency(&key);
                let hit = cache.get(&key).copied();
                assert_eq!(hit.is_some(), before.is_some());
                if let Some(count) = before {
                    assert_eq!(cache.frequency(&key), Some(count + 1));
                }
            }
            4 => {
                let removed = cache.remove(&key);
                if removed.is_some() {
                    assert!(!cache.contains(&key));
                }
            }
            5 => {
                let peeked = cache.peek_lfu().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lfu(), peeked);
            }
            6 => {
                if let Some(previous) = cache.reset_frequency(&key) {
                    assert!(previous >= 1);
                    assert_eq!(cache.frequency(&key), Some(1));
                }
            }
            7 => {
                cache.increment_frequency(&key);
            }
            8 => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(e) = cache.check_invariants() {
            panic!("invariant violated: {}", e);
        }
    }
});
