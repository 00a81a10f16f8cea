//! Errors raised while validating prices and building log returns.
use chrono::NaiveDate;

/// Result alias for price and return operations.
pub type ReturnsResult<T> = Result<T, ReturnsError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReturnsError {
    /// Fewer observations than the operation needs.
    InsufficientData { len: usize, required: usize },

    /// A missing, non-finite or non-positive price. Missing prices carry
    /// `value = NaN`.
    InvalidPrice { index: usize, date: NaiveDate, value: f64, reason: &'static str },

    /// `dates` and `prices` differ in length.
    LengthMismatch { dates: usize, prices: usize },

    /// Dates must be strictly increasing (which also rules out duplicates).
    NonIncreasingDates { index: usize, previous: NaiveDate, current: NaiveDate },

    /// Starting price for reconstruction must be finite and strictly
    /// positive.
    InvalidInitialPrice { value: f64 },
}

impl std::error::Error for ReturnsError {}

impl std::fmt::Display for ReturnsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnsError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: {len} observation(s), at least {required} required")
            }
            ReturnsError::InvalidPrice { index, date, value, reason } => {
                write!(f, "Invalid price at index {index} ({date}): {value}: {reason}")
            }
            ReturnsError::LengthMismatch { dates, prices } => {
                write!(f, "Length mismatch: {dates} date(s) but {prices} price(s)")
            }
            ReturnsError::NonIncreasingDates { index, previous, current } => {
                write!(
                    f,
                    "Dates not strictly increasing: {current} at index {index} follows {previous}"
                )
            }
            ReturnsError::InvalidInitialPrice { value } => {
                write!(f, "Invalid initial price {value}: must be finite and > 0")
            }
        }
    }
}
