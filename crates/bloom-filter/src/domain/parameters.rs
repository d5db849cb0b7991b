//! Filter sizing from a target false-positive rate
//!
//! Formulas:
//! - bpe = -ln(error_rate) / ln(2)^2   -- bits per element
//! - k   = ceil(ln(2) * bpe)           -- hash functions
//! - m   = ceil(k * capacity / ln(2))  -- total bits
//!
//! All counts are rounded up so the configured error rate is never exceeded.

use std::f64::consts::LN_2;

use serde::Serialize;

use crate::error::{FilterError, Result};

/// Sizing of a Bloom filter, fixed once computed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterConfig {
    /// Target false positive rate, strictly in (0, 1)
    error_rate: f64,
    /// Expected number of elements (n)
    capacity: u64,
    /// Bits reserved per expected element
    bits_per_element: f64,
    /// Number of hash functions (k)
    hash_count: usize,
    /// Size in bits (m)
    total_bits: u64,
    /// Bytes backing the bit array, ceil(m / 8)
    buffer_bytes: usize,
}

/// Derive filter sizes for a target error rate and expected element count
///
/// # Errors
/// `InvalidParameter` if `error_rate` is not strictly inside (0, 1), if
/// `capacity` is 0, or if the resulting buffer does not fit in memory
/// addressable by this platform.
pub fn compute_parameters(error_rate: f64, capacity: u64) -> Result<FilterConfig> {
    // Negated comparison so NaN is rejected too
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(FilterError::InvalidParameter(format!(
            "error rate should be greater than 0 and less than 1, got {}",
            error_rate
        )));
    }

    if capacity < 1 {
        return Err(FilterError::InvalidParameter(
            "capacity should be at least 1".to_string(),
        ));
    }

    let bits_per_element = -error_rate.ln() / (LN_2 * LN_2);

    let hash_count = ((LN_2 * bits_per_element).ceil() as usize).max(1);

    let total_bits = (hash_count as f64 * capacity as f64 / LN_2).ceil();
    if !total_bits.is_finite() || total_bits >= u64::MAX as f64 {
        return Err(FilterError::InvalidParameter(format!(
            "capacity {} needs more bits than can be addressed",
            capacity
        )));
    }
    let total_bits = total_bits as u64;

    let buffer_bytes = usize::try_from(total_bits.div_ceil(8)).map_err(|_| {
        FilterError::InvalidParameter(format!(
            "bit array of {} bits does not fit in memory",
            total_bits
        ))
    })?;

    Ok(FilterConfig {
        error_rate,
        capacity,
        bits_per_element,
        hash_count,
        total_bits,
        buffer_bytes,
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: u64, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

impl FilterConfig {
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn bits_per_element(&self) -> f64 {
        self.bits_per_element
    }

    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    pub fn buffer_bytes(&self) -> usize {
        self.buffer_bytes
    }

    /// Theoretical false positive rate after `inserted` distinct values
    pub fn estimated_false_positive_rate(&self, inserted: u64) -> f64 {
        calculate_fpr(self.total_bits, inserted, self.hash_count)
    }

    /// Theoretical false positive rate once the filter holds `capacity` values
    pub fn expected_fpr(&self) -> f64 {
        self.estimated_false_positive_rate(self.capacity)
    }
}
