//! Error surface for the optimization layer.
//!
//! [`OptError`] collects configuration mistakes (tolerances, memory size,
//! line-search name), numerical failures (non-finite cost, gradient or
//! Hessian), argmin backend errors, and the parameter-validation failures
//! raised while mapping θ into GARCH model space. Model layers convert
//! their own errors into `OptError` at the `LogLikelihood` boundary and
//! convert back with `From<OptError>` once the optimizer returns.
use argmin::core::{ArgminError, Error};

use crate::volatility::errors::ParamError;

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// The objective has no analytic gradient; finite differences are used instead.
    GradientNotImplemented,

    /// Gradient length differs from the length of θ.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// A gradient element is NaN or infinite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MLEOptions ----
    /// Gradient tolerance must be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost-change tolerance must be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// The iteration cap must be at least 1.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one stopping rule must be set.
    NoTolerancesProvided,

    /// Unknown line-search name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// L-BFGS memory must be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Objective ----
    /// The objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// The solver returned a non-finite estimate.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// The solver finished without a best parameter vector.
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for `argmin::InvalidParameter`.
    InvalidParameter {
        text: String,
    },
    /// Wrapper for `argmin::NotImplemented`.
    NotImplemented {
        text: String,
    },
    /// Wrapper for `argmin::NotInitialized`.
    NotInitialized {
        text: String,
    },
    /// Wrapper for `argmin::ConditionViolated`.
    ConditionViolated {
        text: String,
    },
    /// Wrapper for `argmin::CheckPointNotFound`.
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for `argmin::PotentialBug`.
    PotentialBug {
        text: String,
    },
    /// Wrapper for `argmin::ImpossibleError`.
    ImpossibleError {
        text: String,
    },
    /// Any other argmin error, carried as text.
    BackendError {
        text: String,
    },

    // ---- Finite differences ----
    /// Hessian shape differs from `(k, k)` for `k = θ.len()`.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// A Hessian entry is NaN or infinite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Parameter mapping ----
    /// θ has the wrong length for the model shape and innovation.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// A θ element is NaN or infinite.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },
    /// The mean is not finite.
    InvalidMu {
        value: f64,
    },
    /// `ω` must be finite and strictly positive.
    InvalidOmega {
        value: f64,
    },
    /// The ARCH coefficient vector does not have `p` entries.
    AlphaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// An ARCH coefficient is negative or non-finite.
    InvalidAlpha {
        index: usize,
        value: f64,
    },
    /// The GARCH coefficient vector does not have `q` entries.
    BetaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// A GARCH coefficient is negative or non-finite.
    InvalidBeta {
        index: usize,
        value: f64,
    },
    /// The stationarity slack `1 − Σα − Σβ` is not strictly positive.
    InvalidSlack {
        value: f64,
    },
    /// `Σα + Σβ ≥ 1`.
    StationarityViolated {
        coeff_sum: f64,
    },
    /// Degrees of freedom must be finite and above 2.
    InvalidNu {
        value: f64,
    },
    /// Skewness must lie in `(−1, 1)`.
    InvalidLambda {
        value: f64,
    },
    /// Shape parameters (`ν`, `λ`) do not match the innovation family.
    ShapeParameterMismatch {
        expected: usize,
        actual: usize,
    },

    // ---- Fallback ----
    /// Catch-all for failures with no more specific variant.
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No stopping criterion provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite objective value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Optimizer returned no parameter estimate")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Finite differences ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Parameter mapping ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidMu { value } => {
                write!(f, "Invalid mean parameter: {value}, must be finite")
            }
            OptError::InvalidOmega { value } => {
                write!(f, "Invalid omega: {value}, must be finite and > 0")
            }
            OptError::AlphaLengthMismatch { expected, actual } => {
                write!(f, "Alpha length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidAlpha { index, value } => {
                write!(f, "Invalid alpha at index {index}: {value}, must be non-negative")
            }
            OptError::BetaLengthMismatch { expected, actual } => {
                write!(f, "Beta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidBeta { index, value } => {
                write!(f, "Invalid beta at index {index}: {value}, must be non-negative")
            }
            OptError::InvalidSlack { value } => {
                write!(f, "Invalid slack value: {value}, must be non-negative")
            }
            OptError::StationarityViolated { coeff_sum } => {
                write!(f, "Non-stationary parameters: sum(alpha) + sum(beta) = {coeff_sum} >= 1")
            }
            OptError::InvalidNu { value } => {
                write!(f, "Invalid degrees of freedom: {value}, must be finite and > 2")
            }
            OptError::InvalidLambda { value } => {
                write!(f, "Invalid skew parameter: {value}, must lie in (-1, 1)")
            }
            OptError::ShapeParameterMismatch { expected, actual } => {
                write!(f, "Innovation shape parameters: expected {expected}, got {actual}")
            }

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "Unknown error"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            ParamError::InvalidMu { value } => OptError::InvalidMu { value },
            ParamError::InvalidOmega { value } => OptError::InvalidOmega { value },
            ParamError::AlphaLengthMismatch { expected, actual } => {
                OptError::AlphaLengthMismatch { expected, actual }
            }
            ParamError::InvalidAlpha { index, value } => OptError::InvalidAlpha { index, value },
            ParamError::BetaLengthMismatch { expected, actual } => {
                OptError::BetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidBeta { index, value } => OptError::InvalidBeta { index, value },
            ParamError::InvalidSlack { value } => OptError::InvalidSlack { value },
            ParamError::StationarityViolated { coeff_sum } => {
                OptError::StationarityViolated { coeff_sum }
            }
            ParamError::InvalidNu { value } => OptError::InvalidNu { value },
            ParamError::InvalidLambda { value } => OptError::InvalidLambda { value },
            ParamError::ShapeParameterMismatch { expected, actual } => {
                OptError::ShapeParameterMismatch { expected, actual }
            }
        }
    }
}
