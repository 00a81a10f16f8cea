//! Error handling for inference routines.
//!
//! `InferenceError` covers failures while turning an estimate into
//! uncertainty statements: the observed-information Hessian could not be
//! formed, carries no usable curvature, or produced a non-finite
//! covariance. `InferenceResult<T>` is the module-wide alias.
use crate::optimization::errors::OptError;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Observed information ----
    /// Finite-difference Hessian failed.
    Hessian(OptError),

    /// No eigenvalue of the information exceeds the truncation threshold.
    SingularInformation { dim: usize },

    // ---- Covariance ----
    /// A covariance entry is NaN or infinite.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    DimensionMismatch { expected: usize, found: usize },

    /// The covariance is scaled by `1/n`, so `n` must be positive.
    InvalidSampleSize { n_obs: usize },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::Hessian(err)
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::Hessian(err) => {
                write!(f, "Inference Error: observed information unavailable ({err})")
            }
            InferenceError::SingularInformation { dim } => write!(
                f,
                "Inference Error: observed information ({dim}x{dim}) has no positive curvature"
            ),
            InferenceError::NonFiniteCovariance { row, col, value } => {
                write!(f, "Inference Error: covariance entry ({row}, {col}) is {value}")
            }
            InferenceError::DimensionMismatch { expected, found } => {
                write!(f, "Inference Error: expected dimension {expected}, found {found}")
            }
            InferenceError::InvalidSampleSize { n_obs } => {
                write!(f, "Inference Error: sample size {n_obs} must be positive")
            }
        }
    }
}
