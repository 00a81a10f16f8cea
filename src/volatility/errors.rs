//! Errors for the GARCH variance model (data checks, parameter validation,
//! fitting failures).
//!
//! Two types live here:
//! - [`ParamError`]: a candidate parameter vector is malformed or outside
//!   the admissible region. Raised by parameter constructors and θ maps,
//!   and converted into `OptError` inside the optimizer.
//! - [`GarchError`]: everything the fitter, forecasts and data validation
//!   can report to a caller, including the stationarity, convergence and
//!   degenerate-data failures of the pipeline's error taxonomy.
//!
//! ## Conventions
//! - Indices are 0-based.
//! - `From<ParamError>` and `From<OptError>` route stationarity violations to
//!   [`GarchError::NonStationaryParameters`] whichever layer detected them.
use crate::optimization::errors::OptError;

/// Result alias for fitting, forecasting and data validation.
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter construction and θ maps.
pub type ParamResult<T> = Result<T, ParamError>;

#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Fewer returns than the model has parameters plus one.
    InsufficientData { len: usize, required: usize },

    /// First NaN or infinite return.
    NonFiniteData { index: usize, value: f64 },

    /// Two series that must be aligned differ in length.
    LengthMismatch { expected: usize, actual: usize },

    /// A conditional variance that is not finite and strictly positive.
    InvalidVariance { index: usize, value: f64 },

    /// The return series has (near-)zero variance.
    DegenerateData { variance: f64 },

    // ---- Model specification ----
    /// `p` and `q` must both be at least 1.
    InvalidModelShape { p: usize, q: usize, reason: &'static str },

    /// Variance clamps must satisfy `0 < min < max < ∞`.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    // ---- Parameters ----
    /// `Σα + Σβ ≥ 1`.
    NonStationaryParameters { coeff_sum: f64 },

    /// Any other [`ParamError`].
    InvalidParameter(ParamError),

    // ---- Fitting ----
    /// The optimizer stopped without meeting a tolerance.
    Convergence { iterations: usize, status: String },

    /// Optimizer failure other than non-convergence.
    Optimization(OptError),

    // ---- Post-fit ----
    /// Forecast horizon must be at least 1.
    InvalidHorizon { horizon: usize },

    /// Annualization factor must be finite and strictly positive.
    InvalidAnnualization { factor: f64 },
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GarchError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: {len} return(s), at least {required} required")
            }
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Non-finite return at index {index}: {value}")
            }
            GarchError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, actual {actual}")
            }
            GarchError::InvalidVariance { index, value } => {
                write!(f, "Invalid conditional variance at index {index}: {value}")
            }
            GarchError::DegenerateData { variance } => {
                write!(f, "Degenerate data: return variance {variance:e} is (near) zero")
            }
            GarchError::InvalidModelShape { p, q, reason } => {
                write!(f, "Invalid GARCH({p}, {q}) shape: {reason}")
            }
            GarchError::InvalidVarianceGuards { min, max, reason } => {
                write!(f, "Invalid variance guards [{min}, {max}]: {reason}")
            }
            GarchError::NonStationaryParameters { coeff_sum } => {
                write!(
                    f,
                    "Non-stationary parameters: sum(alpha) + sum(beta) = {coeff_sum}, must be < 1"
                )
            }
            GarchError::InvalidParameter(err) => write!(f, "Invalid parameter: {err}"),
            GarchError::Convergence { iterations, status } => {
                write!(
                    f,
                    "Optimizer did not converge after {iterations} iteration(s) (status: {status})"
                )
            }
            GarchError::Optimization(err) => write!(f, "Optimization failed: {err}"),
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Invalid forecast horizon {horizon}: must be at least 1")
            }
            GarchError::InvalidAnnualization { factor } => {
                write!(f, "Invalid annualization factor {factor}: must be finite and > 0")
            }
        }
    }
}

/// A parameter vector outside the admissible region.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    ThetaLengthMismatch { expected: usize, actual: usize },

    InvalidThetaInput { index: usize, value: f64 },

    InvalidMu { value: f64 },

    InvalidOmega { value: f64 },

    AlphaLengthMismatch { expected: usize, actual: usize },

    InvalidAlpha { index: usize, value: f64 },

    BetaLengthMismatch { expected: usize, actual: usize },

    InvalidBeta { index: usize, value: f64 },

    /// `1 − Σα − Σβ` is not strictly positive after the θ-map.
    InvalidSlack { value: f64 },

    StationarityViolated { coeff_sum: f64 },

    InvalidNu { value: f64 },

    InvalidLambda { value: f64 },

    /// Number of shape parameters does not match the innovation family.
    ShapeParameterMismatch { expected: usize, actual: usize },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            ParamError::InvalidMu { value } => write!(f, "Invalid mu: {value}, must be finite"),
            ParamError::InvalidOmega { value } => {
                write!(f, "Invalid omega: {value}, must be finite and > 0")
            }
            ParamError::AlphaLengthMismatch { expected, actual } => {
                write!(f, "Alpha length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidAlpha { index, value } => {
                write!(f, "Invalid alpha at index {index}: {value}, must be finite and >= 0")
            }
            ParamError::BetaLengthMismatch { expected, actual } => {
                write!(f, "Beta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::InvalidBeta { index, value } => {
                write!(f, "Invalid beta at index {index}: {value}, must be finite and >= 0")
            }
            ParamError::InvalidSlack { value } => {
                write!(f, "Invalid slack: {value}, must be finite and >= 0")
            }
            ParamError::StationarityViolated { coeff_sum } => {
                write!(f, "Stationarity violated: sum(alpha) + sum(beta) = {coeff_sum} >= 1")
            }
            ParamError::InvalidNu { value } => {
                write!(f, "Invalid degrees of freedom nu: {value}, must be finite and > 2")
            }
            ParamError::InvalidLambda { value } => {
                write!(f, "Invalid skew lambda: {value}, must lie in (-1, 1)")
            }
            ParamError::ShapeParameterMismatch { expected, actual } => {
                write!(
                    f,
                    "Innovation expects {expected} shape parameter(s), {actual} supplied"
                )
            }
        }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::StationarityViolated { coeff_sum } => {
                GarchError::NonStationaryParameters { coeff_sum }
            }
            other => GarchError::InvalidParameter(other),
        }
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::StationarityViolated { coeff_sum } => {
                GarchError::NonStationaryParameters { coeff_sum }
            }
            other => GarchError::Optimization(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Routing of stationarity failures to `NonStationaryParameters` from
    //   both the parameter layer and the optimizer layer.
    // - Wrapping of other parameter/optimizer errors.
    // - Display text for the convergence failure.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Stationarity violations surface as the same variant regardless of
    // which layer detected them.
    //
    // Given
    // -----
    // - `ParamError::StationarityViolated` and `OptError::StationarityViolated`.
    //
    // Expect
    // ------
    // - Both convert to `GarchError::NonStationaryParameters` with the sum.
    fn stationarity_errors_map_to_non_stationary_parameters() {
        // Act
        let from_param = GarchError::from(ParamError::StationarityViolated { coeff_sum: 1.1 });
        let from_opt = GarchError::from(OptError::StationarityViolated { coeff_sum: 1.3 });

        // Assert
        assert_eq!(from_param, GarchError::NonStationaryParameters { coeff_sum: 1.1 });
        assert_eq!(from_opt, GarchError::NonStationaryParameters { coeff_sum: 1.3 });
    }

    #[test]
    // Purpose
    // -------
    // Other errors are wrapped without losing their payload.
    //
    // Given
    // -----
    // - `ParamError::InvalidNu` and `OptError::NoTolerancesProvided`.
    //
    // Expect
    // ------
    // - `InvalidParameter(..)` and `Optimization(..)` respectively.
    fn other_errors_are_wrapped() {
        // Act & Assert
        assert_eq!(
            GarchError::from(ParamError::InvalidNu { value: 1.5 }),
            GarchError::InvalidParameter(ParamError::InvalidNu { value: 1.5 })
        );
        assert_eq!(
            GarchError::from(OptError::NoTolerancesProvided),
            GarchError::Optimization(OptError::NoTolerancesProvided)
        );
    }

    #[test]
    // Purpose
    // -------
    // The convergence message reports iteration count and status.
    //
    // Given
    // -----
    // - `Convergence { iterations: 500, status: "MaxItersReached" }`.
    //
    // Expect
    // ------
    // - Message contains "500" and "MaxItersReached".
    fn convergence_display_reports_iterations_and_status() {
        // Arrange
        let err = GarchError::Convergence { iterations: 500, status: "MaxItersReached".into() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("500"));
        assert!(msg.contains("MaxItersReached"));
    }
}
