//! Harness configuration from command-line arguments and environment

use bloom_filter::domain::DEFAULT_ERROR_RATE;
use bloom_filter::{FilterOptions, Result};
use clap::Parser;

/// Measure a Bloom filter's false positive rate against an exact set
#[derive(Parser, Debug, Clone)]
#[command(name = "bloom-harness")]
#[command(about = "Measure the observed false positive rate of the Bloom filter")]
pub struct HarnessArgs {
    /// Target false positive rate, strictly between 0 and 1
    #[arg(short, long, env = "BLOOM_ERROR_RATE", default_value_t = DEFAULT_ERROR_RATE)]
    pub error_rate: f64,

    /// Expected number of elements the filter is sized for
    #[arg(short, long, env = "BLOOM_CAPACITY", default_value_t = 10_000_000)]
    pub capacity: u64,

    /// Number of UUIDs in each of the training and test datasets
    #[arg(short, long, env = "BLOOM_DATASET_SIZE", default_value_t = 1_000_000)]
    pub dataset_size: usize,

    /// Seed for datasets and hash functions (random when unset)
    #[arg(long, env = "BLOOM_SEED")]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "BLOOM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "BLOOM_JSON_LOGS")]
    pub json_logs: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl HarnessArgs {
    /// Validated filter options for this run
    pub fn filter_options(&self) -> Result<FilterOptions> {
        FilterOptions::new(self.error_rate, self.capacity)
    }
}
