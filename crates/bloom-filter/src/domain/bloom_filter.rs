//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - No false negatives: once `add(v)` succeeds, `contains(v)` returns true
//! - Bits are only ever set, never cleared
//! - Sizes and hash seeds are fixed at construction

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::bit_array::BitArray;
use super::config::FilterOptions;
use super::hash_functions::{Hash64, HashFamily, Murmur3Hasher};
use super::parameters::{compute_parameters, FilterConfig};
use crate::error::{FilterError, Result};

/// Outcome of [`BloomFilter::add`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    /// Every bit for the value was already set before this call.
    ///
    /// This is a hint, not a membership answer: other values can set all of
    /// this value's bits, so it may be `true` the first time a value is added.
    pub already_present: bool,
}

/// Bloom filter for probabilistic membership testing
///
/// False positives are possible, false negatives are not. The filter is not
/// synchronised; `add` and `contains` both take `&mut self` because the hash
/// functions and the position buffer are reused between calls. Wrap it in a
/// mutex to share it between threads.
#[derive(Clone, Debug)]
pub struct BloomFilter<H = Murmur3Hasher> {
    config: FilterConfig,
    hashes: HashFamily<H>,
    bits: BitArray,
    /// Scratch buffer of one position per hash function
    indexes: Vec<u64>,
}

impl BloomFilter {
    /// Create a filter for the given sizing, seeding hashers from OS entropy
    ///
    /// # Errors
    /// `InvalidParameter` if the bit array cannot be allocated.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let hashes = HashFamily::new(config.hash_count());
        Self::assemble(config, hashes)
    }

    /// Create a filter whose hash seeds are derived from `seed`
    pub fn with_seed(config: FilterConfig, seed: u64) -> Result<Self> {
        let hashes = HashFamily::with_seed(config.hash_count(), seed);
        Self::assemble(config, hashes)
    }

    /// Size and create a filter in one step
    ///
    /// # Errors
    /// `InvalidParameter` if `error_rate` is outside (0, 1), `capacity` is 0,
    /// or the resulting bit array cannot be allocated.
    pub fn with_rate(error_rate: f64, capacity: u64) -> Result<Self> {
        compute_parameters(error_rate, capacity).and_then(Self::new)
    }

    pub fn from_options(options: &FilterOptions) -> Result<Self> {
        options.to_config().and_then(Self::new)
    }
}

impl<H: Hash64> BloomFilter<H> {
    /// Create a filter from an existing hash family
    ///
    /// # Errors
    /// `InvalidParameter` if the family does not hold exactly
    /// `config.hash_count()` hash functions.
    pub fn from_parts(config: FilterConfig, hashes: HashFamily<H>) -> Result<Self> {
        if hashes.len() != config.hash_count() {
            return Err(FilterError::InvalidParameter(format!(
                "expected {} hash functions, got {}",
                config.hash_count(),
                hashes.len()
            )));
        }
        Self::assemble(config, hashes)
    }

    fn assemble(config: FilterConfig, hashes: HashFamily<H>) -> Result<Self> {
        let bits = BitArray::new(config.buffer_bytes())?;

        debug!(
            error_rate = config.error_rate(),
            capacity = config.capacity(),
            total_bits = config.total_bits(),
            hash_count = config.hash_count(),
            buffer_bytes = config.buffer_bytes(),
            "Bloom filter allocated"
        );

        Ok(Self {
            bits,
            indexes: vec![0; config.hash_count()],
            config,
            hashes,
        })
    }

    /// Insert a value into the filter
    ///
    /// After a successful call `contains(value)` returns true for the life
    /// of the filter. Adding the same value again leaves the bits unchanged.
    ///
    /// # Errors
    /// - `EmptyValue` for a zero-length value
    /// - `HashFailure` if a hash function rejects the bytes
    ///
    /// No bit is touched when an error is returned.
    pub fn add(&mut self, value: &[u8]) -> Result<AddOutcome> {
        self.update_indexes(value)?;

        let mut already_present = true;
        for &index in &self.indexes {
            if !self.bits.is_bit_set(index) {
                already_present = false;
                self.bits.set_bit(index);
            }
        }

        Ok(AddOutcome { already_present })
    }

    /// Test if a value might be in the filter
    ///
    /// Returns:
    /// - `true` if the value might be in the set (could be false positive)
    /// - `false` if the value is definitely NOT in the set
    ///
    /// # Errors
    /// Same as [`BloomFilter::add`].
    pub fn contains(&mut self, value: &[u8]) -> Result<bool> {
        self.update_indexes(value)?;
        Ok(self.indexes.iter().all(|&index| self.bits.is_bit_set(index)))
    }

    /// Compute every position for `value` before any bit is read or written
    fn update_indexes(&mut self, value: &[u8]) -> Result<()> {
        if value.is_empty() {
            return Err(FilterError::EmptyValue);
        }
        self.hashes
            .positions(value, self.config.total_bits(), &mut self.indexes)
    }

    /// Derived parameters, for logging and diagnostics
    pub fn info(&self) -> FilterInfo {
        FilterInfo::from(&self.config)
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Seeds of the hash functions, in evaluation order
    pub fn seeds(&self) -> Vec<u32> {
        self.hashes.seeds()
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of the `m` usable bits that are set
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.config.total_bits() as f64
    }

    /// Raw bit array, bit `i` at bit `i % 8` of byte `i / 8`
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

/// Read-only view of a filter's derived parameters
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterInfo {
    pub error_rate: f64,
    pub capacity: u64,
    pub total_bits: u64,
    pub bits_per_element: f64,
    pub hash_count: usize,
    pub buffer_bytes: usize,
    /// Theoretical false positive rate once `capacity` values are added
    pub expected_fpr: f64,
}

impl FilterInfo {
    /// Render the parameters prefixed with `key: <key>, `
    pub fn labelled(&self, key: &str) -> String {
        if key.is_empty() {
            return self.to_string();
        }
        format!("key: {}, {}", key, self)
    }
}

impl From<&FilterConfig> for FilterInfo {
    fn from(config: &FilterConfig) -> Self {
        Self {
            error_rate: config.error_rate(),
            capacity: config.capacity(),
            total_bits: config.total_bits(),
            bits_per_element: config.bits_per_element(),
            hash_count: config.hash_count(),
            buffer_bytes: config.buffer_bytes(),
            expected_fpr: config.expected_fpr(),
        }
    }
}

impl fmt::Display for FilterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error rate : {:.6}", self.error_rate)?;
        writeln!(f, "capacity : {}", self.capacity)?;
        writeln!(f, "total bits reserved : {}", self.total_bits)?;
        writeln!(f, "bits per element : {:.6}", self.bits_per_element)?;
        writeln!(f, "hash functions : {}", self.hash_count)?;
        writeln!(f, "buffer bytes : {}", self.buffer_bytes)?;
        write!(f, "expected fpr : {:.6}", self.expected_fpr)
    }
}
