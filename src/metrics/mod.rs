//! Optional counters for cache behavior (feature `metrics`).
//!
//! Recording is split from reading: the cache records through the
//! [`traits::CoreMetricsRecorder`] / [`traits::LfuMetricsRecorder`] traits
//! and exposes an owned [`lfu::LfuMetricsSnapshot`] via
//! [`traits::MetricsSnapshotProvider`].
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert(1, "a");
//! cache.get(&1);
//! cache.get(&7);
//!
//! let snapshot = cache.metrics_snapshot();
//! assert_eq!(snapshot.get_hits, 1);
//! assert_eq!(snapshot.get_misses, 1);
//! ```

pub mod cell;
pub mod lfu;
pub mod traits;
