#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::SlabAllocator;

// Fuzz acquire/release/clear sequences on SlabAllocator
//
// Never acquires when full and never releases a dead id, so any panic is a bug.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 64) + 1;
    let mut slab: SlabAllocator<u8> = SlabAllocator::with_capacity(capacity);
    let mut live = Vec::new();

    for pair in rest.chunks_exact(2) {
        let value = pair[1];
        match pair[0] % 4 {
            0 | 1 => {
                if !slab.is_full() {
                    let id = slab.acquire(value);
                    assert_eq!(slab.get(id), Some(&value));
                    live.push(id);
                }
            }
            2 => {
                if !live.is_empty() {
                    let id = live.swap_remove(usize::from(value) % live.len());
                    slab.release(id);
                    assert!(!slab.contains(id));
                }
            }
            3 => {
                if value == 0 {
                    slab.clear();
                    live.clear();
                }
            }
            _ => unreachable!(),
        }

        let stats = slab.stats();
        assert!(stats.is_conserved());
        assert_eq!(stats.in_use, live.len());
        assert!(live.iter().all(|id| slab.contains(*id)));
    }
});
