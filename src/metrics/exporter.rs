use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::TableMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for table metrics snapshots.
///
/// Writes the Prometheus text exposition format so snapshots can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .expect("metrics exporter writer poisoned")
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {}_{} counter", self.prefix, name);
        let _ = writeln!(writer, "{}_{} {}", self.prefix, name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {}_{} gauge", self.prefix, name);
        let _ = writeln!(writer, "{}_{} {}", self.prefix, name, value);
    }
}

impl<W: Write + Send + Sync> MetricsExporter<TableMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TableMetricsSnapshot) {
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("insert_counted_total", snapshot.insert_counted);
        self.write_counter("insert_rejected_total", snapshot.insert_rejected);
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_decrements_total", snapshot.remove_decrements);
        self.write_counter("remove_unlinks_total", snapshot.remove_unlinks);
        self.write_counter("remove_misses_total", snapshot.remove_misses);
        self.write_counter("probe_calls_total", snapshot.probe_calls);
        self.write_counter("probe_hits_total", snapshot.probe_hits);
        self.write_counter("probe_misses_total", snapshot.probe_misses);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_gauge("values_stored", snapshot.values_stored as u64);
        self.write_gauge("buckets_used", snapshot.buckets_used as u64);
        self.write_gauge("bucket_count", snapshot.bucket_count as u64);
    }
}
