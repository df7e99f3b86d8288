use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Used for reads such as `peek_lfu` and `frequency` that take the cache by
/// shared reference.
///
/// Not synchronized: the cell is `Send` but not `Sync`, so a cache that
/// records metrics can move between threads but cannot be shared without a
/// lock.
///
/// ```compile_fail
/// use lfukit::policy::lfu::LfuCache;
///
/// fn assert_sync<T: Sync>(_: &T) {}
///
/// let cache: LfuCache<u64, u64> = LfuCache::new(4);
/// assert_sync(&cache);
/// ```
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
