//! Comparison report

use std::fmt;

use bloom_filter::{FilterInfo, MetricsSnapshot};
use serde::Serialize;

use crate::compare::Timings;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filter: FilterInfo,
    pub inserted: u64,
    pub queried: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    /// false_positives / queried
    pub observed_fpr: f64,
    pub fill_ratio: f64,
    pub insert_ms: u64,
    pub query_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,
}

impl Report {
    pub fn new(
        filter: FilterInfo,
        inserted: u64,
        queried: u64,
        false_positives: u64,
        false_negatives: u64,
        fill_ratio: f64,
        timings: Timings,
    ) -> Self {
        let observed_fpr = if queried > 0 {
            false_positives as f64 / queried as f64
        } else {
            0.0
        };

        Self {
            filter,
            inserted,
            queried,
            false_positives,
            false_negatives,
            observed_fpr,
            fill_ratio,
            insert_ms: timings.insert.as_millis() as u64,
            query_ms: timings.query.as_millis() as u64,
            metrics: None,
        }
    }

    /// Attach the counters collected while the report was produced
    pub fn with_metrics(mut self, snapshot: MetricsSnapshot) -> Self {
        self.metrics = Some(snapshot);
        self
    }

    /// Observed rate is within `factor` times the configured error rate
    pub fn within(&self, factor: f64) -> bool {
        self.observed_fpr <= self.filter.error_rate * factor
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.filter)?;
        writeln!(f, "inserted : {}", self.inserted)?;
        writeln!(f, "queried : {}", self.queried)?;
        writeln!(f, "false positives : {}", self.false_positives)?;
        writeln!(f, "false negatives : {}", self.false_negatives)?;
        writeln!(
            f,
            "observed fpr : {:.6} (configured {:.6})",
            self.observed_fpr, self.filter.error_rate
        )?;
        writeln!(f, "fill ratio : {:.4}", self.fill_ratio)?;
        write!(f, "insert ms : {}, query ms : {}", self.insert_ms, self.query_ms)
    }
}
