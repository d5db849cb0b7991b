//! # Bloom Harness
//!
//! Measures how often the Bloom filter reports a value it never saw.
//!
//! 1. Generate a training and a disjoint test set of random UUIDs
//! 2. Insert the training set into the filter and into an exact `HashSet`
//! 3. Query the filter with both sets; count false negatives (must be 0)
//!    and false positives
//! 4. Report the observed rate next to the configured one
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BLOOM_ERROR_RATE` | `0.01` | Target false positive rate |
//! | `BLOOM_CAPACITY` | `10000000` | Filter capacity |
//! | `BLOOM_DATASET_SIZE` | `1000000` | Values per dataset |
//! | `BLOOM_SEED` | random | Seed for datasets and hashes |
//! | `BLOOM_LOG_LEVEL` | `info` | Log filter (`RUST_LOG` overrides) |
//! | `BLOOM_JSON_LOGS` | `false` | JSON log output |

pub mod compare;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod report;

pub use compare::run_comparison;
pub use config::HarnessArgs;
pub use dataset::{generate_dataset, generate_datasets, Datasets};
pub use report::Report;
