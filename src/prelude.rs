pub use crate::builder::CacheBuilder;
pub use crate::ds::{FrequencyLedger, LedgerSnapshot, LinkedList, NodeId, PoolStats, SlabAllocator};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::lfu::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
#[cfg(feature = "concurrency")]
pub use crate::policy::lfu::ConcurrentLfuCache;
pub use crate::policy::lfu::{LedgerPoolStats, LfuCache};
pub use crate::traits::{ConcurrentCache, CoreCache, LfuCacheTrait, MutableCache};
