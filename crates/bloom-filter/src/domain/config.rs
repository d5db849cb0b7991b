//! Caller-facing filter options and validation
//!
//! # Example
//!
//! ```ignore
//! use bloom_filter::FilterOptionsBuilder;
//!
//! let options = FilterOptionsBuilder::new()
//!     .error_rate(0.001)
//!     .capacity(1_000_000)
//!     .build()
//!     .expect("Valid options");
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{compute_parameters, FilterConfig};
use crate::error::{FilterError, Result};

pub const DEFAULT_ERROR_RATE: f64 = 0.01;
pub const DEFAULT_CAPACITY: u64 = 1024;

/// Requested error rate and capacity, before sizing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Target false positive rate, strictly in (0, 1)
    pub error_rate: f64,
    /// Expected number of elements
    pub capacity: u64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            error_rate: DEFAULT_ERROR_RATE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl FilterOptions {
    /// Create validated options
    pub fn new(error_rate: f64, capacity: u64) -> Result<Self> {
        let options = Self {
            error_rate,
            capacity,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parse `[error_rate, capacity]` from textual arguments
    ///
    /// Missing arguments fall back to the defaults, so `&[]` yields
    /// `FilterOptions::default()`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let error_rate = match args.first() {
            Some(raw) => raw.as_ref().trim().parse::<f64>().map_err(|_| {
                FilterError::InvalidParameter(format!(
                    "error rate must be a floating point number, got {:?}",
                    raw.as_ref()
                ))
            })?,
            None => DEFAULT_ERROR_RATE,
        };

        let capacity = match args.get(1) {
            Some(raw) => raw.as_ref().trim().parse::<u64>().map_err(|_| {
                FilterError::InvalidParameter(format!(
                    "capacity must be an unsigned integer, got {:?}",
                    raw.as_ref()
                ))
            })?,
            None => DEFAULT_CAPACITY,
        };

        Self::new(error_rate, capacity)
    }

    /// Check the options without sizing a filter
    pub fn validate(&self) -> Result<()> {
        self.to_config().map(|_| ())
    }

    /// Derive the filter sizes for these options
    pub fn to_config(&self) -> Result<FilterConfig> {
        compute_parameters(self.error_rate, self.capacity)
    }

    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate;
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Builder for FilterOptions with validation
#[derive(Default)]
pub struct FilterOptionsBuilder {
    error_rate: Option<f64>,
    capacity: Option<u64>,
}

impl FilterOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target false positive rate (must be in (0, 1))
    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    /// Set expected number of elements (must be at least 1)
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Build the options, falling back to defaults for unset fields
    pub fn build(self) -> Result<FilterOptions> {
        let defaults = FilterOptions::default();
        FilterOptions::new(
            self.error_rate.unwrap_or(defaults.error_rate),
            self.capacity.unwrap_or(defaults.capacity),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        let options = FilterOptions::default();
        assert_eq!(options.error_rate, 0.01);
        assert_eq!(options.capacity, 1024);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_args_parses_both_values() {
        let options = FilterOptions::from_args(&["0.001", "10000000"]).unwrap();
        assert_eq!(options.error_rate, 0.001);
        assert_eq!(options.capacity, 10_000_000);
    }

    #[test]
    fn test_from_args_empty_uses_defaults() {
        let args: [&str; 0] = [];
        assert_eq!(FilterOptions::from_args(&args).unwrap(), FilterOptions::default());
    }

    #[test]
    fn test_from_args_rejects_non_numeric_error_rate() {
        let result = FilterOptions::from_args(&["one percent", "100"]);
        match result {
            Err(FilterError::InvalidParameter(msg)) => assert!(msg.contains("error rate")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_from_args_rejects_negative_capacity() {
        let result = FilterOptions::from_args(&["0.01", "-5"]);
        match result {
            Err(FilterError::InvalidParameter(msg)) => assert!(msg.contains("capacity")),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_from_args_rejects_out_of_range_values() {
        assert!(FilterOptions::from_args(&["1.0", "100"]).is_err());
        assert!(FilterOptions::from_args(&["0.01", "0"]).is_err());
    }

    #[test]
    fn test_builder_creates_valid_options() {
        let options = FilterOptionsBuilder::new()
            .error_rate(0.05)
            .capacity(500)
            .build()
            .expect("Should create valid options");

        assert_eq!(options.error_rate, 0.05);
        assert_eq!(options.capacity, 500);
    }

    #[test]
    fn test_builder_uses_defaults() {
        let options = FilterOptionsBuilder::new().capacity(10).build().unwrap();
        assert_eq!(options.error_rate, DEFAULT_ERROR_RATE);
    }

    #[test]
    fn test_builder_rejects_invalid_error_rate() {
        let result = FilterOptionsBuilder::new().error_rate(-0.5).build();
        assert!(matches!(result, Err(FilterError::InvalidParameter(_))));
    }

    #[test]
    fn test_with_methods_are_unchecked_until_validate() {
        let options = FilterOptions::default().with_capacity(0);
        assert!(options.validate().is_err());

        let options = options.with_capacity(1).with_error_rate(0.2);
        assert!(options.validate().is_ok());
    }
}
