//! # Bloom Filter
//!
//! Probabilistic set membership with a tunable false-positive rate and no
//! false negatives.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `compute_parameters`: Sizing from error rate and capacity
//!   - `FilterOptions` / `FilterOptionsBuilder`: Caller-facing configuration
//!   - `HashFamily`: `k` independently seeded MurmurHash3 functions
//!   - `BitArray`: Packed, set-only bit storage
//!   - `BloomFilter`: `add` / `contains` over the above
//!
//! - **Metrics** (`metrics.rs`): Counters a caller can record into
//!
//! ## Sizing
//!
//! - bits per element = -ln(e) / ln(2)^2
//! - k = ceil(ln(2) * bits per element)
//! - m = ceil(k * n / ln(2))
//!
//! ## Invariants
//!
//! - No false negatives - if added, `contains()` MUST return true
//! - Bits are never cleared; adding a value twice leaves the array unchanged
//! - A failed `add` or `contains` never touches the bit array
//!
//! ## Concurrency
//!
//! `BloomFilter` has a single owner and no internal locking. Put it behind a
//! `Mutex` (or give each writer its own filter) when it must be shared.
//!
//! ## Usage Example
//!
//! ```ignore
//! use bloom_filter::BloomFilter;
//!
//! let mut filter = BloomFilter::with_rate(0.01, 1_000)?;
//! filter.add(b"6f1c2a3e-8d4b-4b1a-9c7e-2f5d6a7b8c9d")?;
//!
//! assert!(filter.contains(b"6f1c2a3e-8d4b-4b1a-9c7e-2f5d6a7b8c9d")?);
//! println!("{}", filter.info());
//! ```

pub mod domain;
pub mod error;
pub mod metrics;

// Re-exports for convenience
pub use domain::{
    compute_parameters, AddOutcome, BloomFilter, FilterConfig, FilterInfo, FilterOptions,
    FilterOptionsBuilder, Hash64, HashFamily, Murmur3Hasher,
};
pub use error::{FilterError, Result};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
