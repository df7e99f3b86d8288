//! Metrics recording and snapshot traits.
//!
//! ```text
//!   CoreMetricsRecorder          get hit/miss, insert new/update, evict
//!          │
//!          ▼
//!   LfuMetricsRecorder           pop/reset/increment (&mut self paths)
//!   LfuMetricsReadRecorder       peek/frequency      (&self paths)
//!
//!   MetricsSnapshotProvider<S>   owned copy for tests and benches
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LFU counters recorded on `&mut self` paths.
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_reset_frequency_call(&mut self);
    fn record_reset_frequency_found(&mut self);
    fn record_increment_frequency_call(&mut self);
    fn record_increment_frequency_found(&mut self);
}

/// LFU counters recorded on `&self` paths (interior mutability).
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Produces an owned snapshot of the current counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zeroes every counter.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
