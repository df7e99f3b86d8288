//! lfukit: an O(1) least-frequently-used cache.
//!
//! Entries live in fixed-capacity slabs and are grouped into count buckets
//! kept in ascending order, so lookups, promotions and evictions never search
//! or allocate. See [`policy::lfu`] for the cache and [`ds`] for the building
//! blocks.
//!
//! ```
//! use lfukit::prelude::*;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
