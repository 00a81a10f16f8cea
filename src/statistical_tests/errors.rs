//! statistical_tests::errors — error type shared by the residual diagnostics.
//!
//! Purpose
//! -------
//! Give descriptive statistics, Ljung–Box and Jarque–Bera a single error
//! surface so that a failed diagnostic aborts the report stage with a
//! structured reason.
//!
//! Key behaviors
//! -------------
//! - [`DiagnosticError`] covers short or non-finite input, a zero-variance
//!   sequence, and invalid lag requests.
//! - `statrs` distribution-construction failures are wrapped rather than
//!   unwrapped.
//!
//! Conventions
//! -----------
//! - Indices are 0-based; lags are 1-based as in the test definitions.
//! - Valid finite input with positive variance never errors.
use statrs::StatsError;

pub type DiagResult<T> = Result<T, DiagnosticError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticError {
    /// Fewer observations than the statistic needs.
    InsufficientData { len: usize, required: usize },

    /// First NaN or infinite observation.
    NonFiniteData { index: usize, value: f64 },

    /// The sequence has zero (or numerically zero) variance.
    DegenerateData { variance: f64 },

    /// A Ljung–Box lag outside `1 ≤ lag < n`.
    InvalidLag { lag: usize, len: usize },

    /// No Ljung–Box lag was requested.
    EmptyLags,

    /// A reference distribution could not be constructed.
    Distribution { text: String },
}

impl std::error::Error for DiagnosticError {}

impl std::fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: {len} observation(s), at least {required} required")
            }
            DiagnosticError::NonFiniteData { index, value } => {
                write!(f, "Non-finite observation at index {index}: {value}")
            }
            DiagnosticError::DegenerateData { variance } => {
                write!(f, "Degenerate data: sample variance {variance:e} is (near) zero")
            }
            DiagnosticError::InvalidLag { lag, len } => {
                write!(f, "Invalid lag {lag}: must satisfy 1 <= lag < {len}")
            }
            DiagnosticError::EmptyLags => write!(f, "At least one lag must be requested"),
            DiagnosticError::Distribution { text } => {
                write!(f, "Reference distribution error: {text}")
            }
        }
    }
}

impl From<StatsError> for DiagnosticError {
    fn from(err: StatsError) -> Self {
        DiagnosticError::Distribution { text: err.to_string() }
    }
}
