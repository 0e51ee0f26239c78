use crate::metrics::cell::ReadCounter;
use crate::metrics::snapshot::TableMetricsSnapshot;
use crate::metrics::traits::{TableMetricsReadRecorder, TableMetricsRecorder};

/// Operation counters for one table.
///
/// Mutating-path counters are plain `u64`; probe-path counters are
/// [`ReadCounter`] cells because probes take the table by `&self`.
#[derive(Debug, Default)]
pub struct TableMetrics {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_counted: u64,
    pub insert_rejected: u64,
    pub remove_calls: u64,
    pub remove_decrements: u64,
    pub remove_unlinks: u64,
    pub remove_misses: u64,
    pub clear_calls: u64,
    pub probe_calls: ReadCounter,
    pub probe_hits: ReadCounter,
    pub probe_misses: ReadCounter,
}

impl TableMetrics {
    /// Snapshot the counters together with the caller-supplied gauges.
    pub fn snapshot(
        &self,
        values_stored: usize,
        buckets_used: usize,
        bucket_count: usize,
    ) -> TableMetricsSnapshot {
        TableMetricsSnapshot {
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_counted: self.insert_counted,
            insert_rejected: self.insert_rejected,
            remove_calls: self.remove_calls,
            remove_decrements: self.remove_decrements,
            remove_unlinks: self.remove_unlinks,
            remove_misses: self.remove_misses,
            probe_calls: self.probe_calls.get(),
            probe_hits: self.probe_hits.get(),
            probe_misses: self.probe_misses.get(),
            clear_calls: self.clear_calls,
            values_stored,
            buckets_used,
            bucket_count,
        }
    }
}

impl TableMetricsRecorder for TableMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_counted(&mut self) {
        self.insert_counted += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_decrement(&mut self) {
        self.remove_decrements += 1;
    }

    fn record_remove_unlink(&mut self) {
        self.remove_unlinks += 1;
    }

    fn record_remove_miss(&mut self) {
        self.remove_misses += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl TableMetricsReadRecorder for TableMetrics {
    fn record_probe_call(&self) {
        self.probe_calls.incr();
    }

    fn record_probe_hit(&self) {
        self.probe_hits.incr();
    }

    fn record_probe_miss(&self) {
        self.probe_misses.incr();
    }
}
