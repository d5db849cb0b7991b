//! Metrics hooks for Bloom filter operations
//!
//! The filter never records anything by itself; callers time their own
//! `add` / `contains` calls and feed the results in.
//!
//! ## Usage
//!
//! ```ignore
//! use bloom_filter::metrics::{Metrics, MetricsRecorder};
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_created(&filter.info());
//!
//! let start = std::time::Instant::now();
//! let found = filter.contains(value)?;
//! metrics.record_lookup(start.elapsed(), found);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::domain::FilterInfo;

/// Metrics collector for Bloom filter operations
///
/// Thread-safe counters; the filter itself is not.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total successful add calls
    pub values_added: AtomicU64,
    /// Add calls whose bits were all set beforehand
    pub adds_already_present: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (true or false positives)
    pub lookups_positive: AtomicU64,
    /// Total bytes allocated for bit arrays
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_created(&self, info: &FilterInfo) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(info.buffer_bytes as u64, Ordering::Relaxed);
    }

    pub fn record_add(&self, duration: Duration, already_present: bool) {
        self.values_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if already_present {
            self.adds_already_present.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the value was reported present (possibly false positive)
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            values_added: self.values_added.load(Ordering::Relaxed),
            adds_already_present: self.adds_already_present.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_add_ns: self.avg_add_time_ns(),
        }
    }

    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn avg_add_time_ns(&self) -> u64 {
        let total = self.add_time_ns.load(Ordering::Relaxed);
        let count = self.values_added.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives; it equals the false positive rate only when
    /// every queried value is known to be absent.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.values_added.store(0, Ordering::Relaxed);
        self.adds_already_present.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.bytes_allocated.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.add_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub values_added: u64,
    pub adds_already_present: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_add_ns: u64,
}

/// Trait for custom metrics recording implementations
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, info: &FilterInfo);

    fn record_add(&self, duration: Duration, already_present: bool);

    fn record_lookup(&self, duration: Duration, found: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: &FilterInfo) {}
    fn record_add(&self, _: Duration, _: bool) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, info: &FilterInfo) {
        Metrics::record_filter_created(self, info);
    }

    fn record_add(&self, duration: Duration, already_present: bool) {
        Metrics::record_add(self, duration, already_present);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compute_parameters, BloomFilter};

    #[test]
    fn test_metrics_initialization() {
        let snapshot = Metrics::new().snapshot();

        assert_eq!(snapshot, MetricsSnapshot::default());
    }

    #[test]
    fn test_record_filter_created() {
        let metrics = Metrics::new();
        let filter = BloomFilter::with_seed(compute_parameters(0.01, 1000).unwrap(), 1).unwrap();

        metrics.record_filter_created(&filter.info());
        metrics.record_filter_created(&filter.info());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_created, 2);
        assert_eq!(snapshot.bytes_allocated, 2 * 1263);
    }

    #[test]
    fn test_record_adds() {
        let metrics = Metrics::new();

        metrics.record_add(Duration::from_nanos(40), false);
        metrics.record_add(Duration::from_nanos(60), true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.values_added, 2);
        assert_eq!(snapshot.adds_already_present, 1);
        assert_eq!(snapshot.avg_add_ns, 50);
    }

    #[test]
    fn test_record_lookups() {
        let metrics = Metrics::new();

        metrics.record_lookup(Duration::from_nanos(100), true);
        metrics.record_lookup(Duration::from_nanos(150), false);
        metrics.record_lookup(Duration::from_nanos(120), true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lookups_performed, 3);
        assert_eq!(snapshot.lookups_positive, 2);
        assert_eq!(snapshot.avg_lookup_ns, 123); // (100 + 150 + 120) / 3
    }

    #[test]
    fn test_observed_positive_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.observed_positive_rate(), 0.0);

        for _ in 0..100 {
            metrics.record_lookup(Duration::from_nanos(100), false);
        }
        for _ in 0..10 {
            metrics.record_lookup(Duration::from_nanos(100), true);
        }

        let rate = metrics.observed_positive_rate();
        assert!((rate - 0.0909).abs() < 0.01); // 10/110
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();

        metrics.record_lookup(Duration::from_nanos(100), true);
        metrics.record_add(Duration::from_nanos(50), false);

        metrics.reset();

        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_noop_metrics() {
        let metrics: Box<dyn MetricsRecorder> = Box::new(NoOpMetrics);
        let filter = BloomFilter::with_seed(compute_parameters(0.1, 10).unwrap(), 1).unwrap();

        metrics.record_filter_created(&filter.info());
        metrics.record_add(Duration::from_nanos(100), false);
        metrics.record_lookup(Duration::from_nanos(100), true);
    }
}
