//! statistical_tests — residual diagnostics and descriptive statistics.
//!
//! Purpose
//! -------
//! Side-effect-free checks on a fitted model's standardized residuals and
//! on the raw returns: Ljung–Box portmanteau tests, the Jarque–Bera
//! normality test, and moment-based descriptive statistics.
//!
//! Key behaviors
//! -------------
//! - [`ljung_box`] at a set of lags with `χ²(L)` p-values.
//! - [`jarque_bera`] with a `χ²(2)` p-value.
//! - [`DescriptiveStats::describe`] for the pre-fit summary of returns.
//! - [`DiagnosticReport`] bundles the residual checks.
//!
//! Conventions
//! -----------
//! - Inputs are `&[f64]`; none are mutated.
//! - Valid numeric input never errors; degenerate input yields
//!   [`DiagnosticError::DegenerateData`].

pub mod diagnostics;
pub mod errors;
pub mod jarque_bera;
pub mod ljung_box;
pub mod moments;
pub mod validation;

pub use self::diagnostics::{DEFAULT_LAGS, DiagnosticReport};
pub use self::errors::{DiagResult, DiagnosticError};
pub use self::jarque_bera::{JarqueBeraOutcome, jarque_bera};
pub use self::ljung_box::{LjungBoxOutcome, ljung_box};
pub use self::moments::{DescriptiveStats, Moments};

pub mod prelude {
    pub use super::{
        DescriptiveStats, DiagResult, DiagnosticError, DiagnosticReport, JarqueBeraOutcome,
        LjungBoxOutcome, jarque_bera, ljung_box,
    };
}
