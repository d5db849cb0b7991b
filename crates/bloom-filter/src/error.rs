//! Error types for the Bloom filter

use thiserror::Error;

/// Errors that can occur while sizing or using a Bloom filter
///
/// Every variant is a caller error: none of them is worth retrying, and
/// none of them leaves the filter partially mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Error rate outside (0, 1), capacity below 1, or a derived size the
    /// platform cannot address or allocate.
    #[error("Invalid filter parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty value can't be added to or looked up in the filter")]
    EmptyValue,

    /// A hash function could not consume the value's bytes.
    #[error("Unable to hash value: {0}")]
    HashFailure(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
