//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Parameter calculations (sizing from error rate and capacity)
//! - Caller-facing options and validation
//! - Hash functions
//! - Bit array
//! - Core Bloom filter implementation
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking

pub mod bit_array;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bit_array::BitArray;
pub use bloom_filter::{AddOutcome, BloomFilter, FilterInfo};
pub use config::{FilterOptions, FilterOptionsBuilder, DEFAULT_CAPACITY, DEFAULT_ERROR_RATE};
pub use hash_functions::{Hash64, HashFamily, Murmur3Hasher};
pub use parameters::{calculate_fpr, compute_parameters, FilterConfig};
