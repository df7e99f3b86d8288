pub mod ledger;
pub mod list;
pub mod slab;

pub use ledger::{BUCKET_HEADROOM, BucketView, FrequencyLedger, LedgerSnapshot};
pub use list::LinkedList;
pub use slab::{NodeId, PoolStats, SlabAllocator};
