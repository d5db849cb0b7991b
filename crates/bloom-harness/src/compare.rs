//! Filter vs exact-set comparison
//!
//! Inserts the training set into a Bloom filter and a `HashSet`, then
//! queries both with the training and test sets. Any disagreement where the
//! filter says "present" and the set says "absent" is a false positive; the
//! reverse would be a false negative and must never happen.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bloom_filter::{compute_parameters, BloomFilter, FilterOptions, MetricsRecorder};
use tracing::{info, info_span};

use crate::dataset::Datasets;
use crate::report::Report;

/// Run one comparison and return its report
///
/// `seed` fixes the filter's hash seeds; the filter is seeded from OS
/// entropy otherwise. Every add and lookup is reported to `recorder`.
pub fn run_comparison(
    options: &FilterOptions,
    seed: Option<u64>,
    datasets: &Datasets,
    recorder: &dyn MetricsRecorder,
) -> Result<Report> {
    let _span = info_span!(
        "comparison",
        error_rate = options.error_rate,
        capacity = options.capacity
    )
    .entered();

    let config = compute_parameters(options.error_rate, options.capacity)
        .context("invalid filter options")?;
    let mut filter = match seed {
        Some(seed) => BloomFilter::with_seed(config, seed),
        None => BloomFilter::new(config),
    }
    .context("failed to create filter")?;
    let info = filter.info();
    recorder.record_filter_created(&info);
    info!(
        total_bits = info.total_bits,
        hash_count = info.hash_count,
        bits_per_element = info.bits_per_element,
        buffer_bytes = info.buffer_bytes,
        "Filter created"
    );

    let mut reference: HashSet<&str> = HashSet::with_capacity(datasets.train.len());
    let insert_started = Instant::now();
    for value in &datasets.train {
        let started = Instant::now();
        let outcome = filter
            .add(value.as_bytes())
            .with_context(|| format!("failed to add {:?}", value))?;
        recorder.record_add(started.elapsed(), outcome.already_present);
        reference.insert(value.as_str());
    }
    let insert_time = insert_started.elapsed();
    info!(
        inserted = datasets.train.len(),
        elapsed_ms = insert_time.as_millis() as u64,
        "Training set inserted"
    );

    let mut false_negatives = 0u64;
    for value in &datasets.train {
        if !filter
            .contains(value.as_bytes())
            .with_context(|| format!("failed to query {:?}", value))?
        {
            false_negatives += 1;
        }
    }

    let mut false_positives = 0u64;
    let query_started = Instant::now();
    for value in &datasets.test {
        let started = Instant::now();
        let found = filter
            .contains(value.as_bytes())
            .with_context(|| format!("failed to query {:?}", value))?;
        recorder.record_lookup(started.elapsed(), found);
        if found && !reference.contains(value.as_str()) {
            false_positives += 1;
        }
    }
    let query_time = query_started.elapsed();

    Ok(Report::new(
        info,
        datasets.train.len() as u64,
        datasets.test.len() as u64,
        false_positives,
        false_negatives,
        filter.fill_ratio(),
        Timings {
            insert: insert_time,
            query: query_time,
        },
    ))
}

/// Wall-clock time of the two phases
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub insert: Duration,
    pub query: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate_dataset;
    use bloom_filter::{Metrics, NoOpMetrics};

    fn datasets(size: usize) -> Datasets {
        Datasets {
            train: generate_dataset(size, Some(10)),
            test: generate_dataset(size, Some(11)),
        }
    }

    #[test]
    fn test_comparison_has_no_false_negatives() {
        let options = FilterOptions::new(0.01, 1000).unwrap();
        let metrics = Metrics::new();

        let report = run_comparison(&options, Some(5), &datasets(1000), &metrics).unwrap();

        assert_eq!(report.false_negatives, 0);
        assert_eq!(report.inserted, 1000);
        assert_eq!(report.queried, 1000);
        assert!(report.false_positives <= 25, "got {}", report.false_positives);
    }

    #[test]
    fn test_comparison_records_metrics() {
        let options = FilterOptions::new(0.05, 200).unwrap();
        let metrics = Metrics::new();

        let report = run_comparison(&options, Some(1), &datasets(200), &metrics).unwrap();
        let snapshot = metrics.snapshot();

        assert_eq!(snapshot.filters_created, 1);
        assert_eq!(snapshot.values_added, 200);
        assert_eq!(snapshot.lookups_performed, 200);
        assert_eq!(snapshot.lookups_positive, report.false_positives);
        assert!(report.metrics.is_none(), "The caller attaches the snapshot");
    }

    #[test]
    fn test_comparison_without_metrics() {
        let options = FilterOptions::new(0.01, 500).unwrap();

        let report = run_comparison(&options, Some(3), &datasets(500), &NoOpMetrics).unwrap();

        assert_eq!(report.false_negatives, 0);
        assert_eq!(report.inserted, 500);
    }

    #[test]
    fn test_unallocatable_filter_is_an_error() {
        let options = FilterOptions::new(0.01, 1 << 60).unwrap();
        let data = datasets(1);

        let err = run_comparison(&options, Some(1), &data, &NoOpMetrics).unwrap_err();

        assert!(format!("{:#}", err).contains("cannot be allocated"), "got {:#}", err);
    }

    #[test]
    fn test_overfilled_filter_reports_more_false_positives() {
        let small = FilterOptions::new(0.01, 10).unwrap();
        let sized = FilterOptions::new(0.01, 2000).unwrap();
        let data = datasets(2000);

        let overfilled = run_comparison(&small, Some(2), &data, &Metrics::new()).unwrap();
        let fitting = run_comparison(&sized, Some(2), &data, &Metrics::new()).unwrap();

        assert!(overfilled.false_positives > fitting.false_positives);
        assert_eq!(overfilled.false_negatives, 0);
    }

    #[test]
    fn test_empty_training_value_is_an_error() {
        let options = FilterOptions::new(0.01, 10).unwrap();
        let data = Datasets {
            train: vec![String::new()],
            test: vec![],
        };

        assert!(run_comparison(&options, None, &data, &Metrics::new()).is_err());
    }
}
