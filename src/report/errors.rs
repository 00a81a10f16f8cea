//! Top-level error taxonomy of the volatility report.
//!
//! Purpose
//! -------
//! Wrap every stage error (returns, fit, inference, diagnostics) together
//! with input and configuration failures into one [`ReportError`], and
//! classify it with [`ReportError::kind`] so callers can match on the
//! pipeline taxonomy without knowing which stage raised it.
//!
//! Conventions
//! -----------
//! - Stage errors convert through `From`, so the driver uses `?` throughout.
//! - I/O and CSV failures carry the offending path as text.
use crate::{
    inference::InferenceError,
    optimization::errors::OptError,
    returns::ReturnsError,
    statistical_tests::DiagnosticError,
    volatility::{GarchError, ParamError},
};

pub type ReportResult<T> = Result<T, ReportError>;

/// Classification of a [`ReportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InsufficientData,
    InvalidPrice,
    NonStationaryParameters,
    Convergence,
    DegenerateData,
    /// Unreadable or malformed input.
    Input,
    Configuration,
    /// Any other numerical failure.
    Numerical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Price validation or return construction failed.
    Returns(ReturnsError),
    /// Model specification, fitting or forecasting failed.
    Garch(GarchError),
    Inference(InferenceError),
    /// Residual diagnostics failed.
    Diagnostics(DiagnosticError),

    /// Price data could not be read or parsed.
    Source { path: String, text: String },

    /// A configuration field is out of range.
    InvalidConfig { field: &'static str, reason: String },

    /// The summary could not be written.
    Output { path: String, text: String },
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Returns(err) => match err {
                ReturnsError::InsufficientData { .. } => ErrorKind::InsufficientData,
                ReturnsError::InvalidPrice { .. } | ReturnsError::InvalidInitialPrice { .. } => {
                    ErrorKind::InvalidPrice
                }
                ReturnsError::LengthMismatch { .. } | ReturnsError::NonIncreasingDates { .. } => {
                    ErrorKind::Input
                }
            },
            ReportError::Garch(err) => match err {
                GarchError::InsufficientData { .. } => ErrorKind::InsufficientData,
                GarchError::NonStationaryParameters { .. } => ErrorKind::NonStationaryParameters,
                GarchError::Convergence { .. } => ErrorKind::Convergence,
                GarchError::DegenerateData { .. } => ErrorKind::DegenerateData,
                GarchError::NonFiniteData { .. } => ErrorKind::Input,
                GarchError::InvalidModelShape { .. }
                | GarchError::InvalidVarianceGuards { .. }
                | GarchError::InvalidHorizon { .. }
                | GarchError::InvalidAnnualization { .. } => ErrorKind::Configuration,
                GarchError::InvalidParameter(ParamError::StationarityViolated { .. }) => {
                    ErrorKind::NonStationaryParameters
                }
                GarchError::InvalidParameter(_)
                | GarchError::LengthMismatch { .. }
                | GarchError::InvalidVariance { .. }
                | GarchError::Optimization(_) => ErrorKind::Numerical,
            },
            ReportError::Inference(_) => ErrorKind::Numerical,
            ReportError::Diagnostics(err) => match err {
                DiagnosticError::InsufficientData { .. } => ErrorKind::InsufficientData,
                DiagnosticError::DegenerateData { .. } => ErrorKind::DegenerateData,
                DiagnosticError::InvalidLag { .. } | DiagnosticError::EmptyLags => {
                    ErrorKind::Configuration
                }
                DiagnosticError::NonFiniteData { .. } | DiagnosticError::Distribution { .. } => {
                    ErrorKind::Numerical
                }
            },
            ReportError::Source { .. } => ErrorKind::Input,
            ReportError::InvalidConfig { .. } => ErrorKind::Configuration,
            ReportError::Output { .. } => ErrorKind::Input,
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Returns(err) => Some(err),
            ReportError::Garch(err) => Some(err),
            ReportError::Inference(err) => Some(err),
            ReportError::Diagnostics(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Returns(err) => write!(f, "Return construction failed: {err}"),
            ReportError::Garch(err) => write!(f, "Volatility model failed: {err}"),
            ReportError::Inference(err) => write!(f, "Parameter inference failed: {err}"),
            ReportError::Diagnostics(err) => write!(f, "Residual diagnostics failed: {err}"),
            ReportError::Source { path, text } => {
                write!(f, "Could not read prices from {path}: {text}")
            }
            ReportError::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration for '{field}': {reason}")
            }
            ReportError::Output { path, text } => write!(f, "Could not write {path}: {text}"),
        }
    }
}

impl From<ReturnsError> for ReportError {
    fn from(err: ReturnsError) -> Self {
        ReportError::Returns(err)
    }
}

impl From<GarchError> for ReportError {
    fn from(err: GarchError) -> Self {
        ReportError::Garch(err)
    }
}

impl From<InferenceError> for ReportError {
    fn from(err: InferenceError) -> Self {
        ReportError::Inference(err)
    }
}

impl From<DiagnosticError> for ReportError {
    fn from(err: DiagnosticError) -> Self {
        ReportError::Diagnostics(err)
    }
}

impl From<OptError> for ReportError {
    fn from(err: OptError) -> Self {
        ReportError::InvalidConfig { field: "optimizer", reason: err.to_string() }
    }
}
