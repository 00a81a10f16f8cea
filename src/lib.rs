//! garch_volatility — conditional volatility estimation and residual
//! diagnostics for daily log returns.
//!
//! Purpose
//! -------
//! Serve as the crate root: a GARCH(p, q) model with Normal, Student-t or
//! skewed Student-t innovations, fitted by maximum likelihood, together
//! with the stages around it (returns, inference, diagnostics, reporting).
//!
//! Key behaviors
//! -------------
//! - [`returns`]: prices → percentage log returns, with an explicit
//!   missing-price policy.
//! - [`volatility`]: variance recursion, skew-t density, the fitter and
//!   the immutable fitted model.
//! - [`optimization`]: the `LogLikelihood` / `Optimizer` seam and the
//!   argmin L-BFGS implementation.
//! - [`inference`]: observed-information covariance and coefficient tables.
//! - [`statistical_tests`]: descriptive statistics, Ljung–Box and
//!   Jarque–Bera.
//! - [`report`]: configuration, price sources and the pipeline driver used
//!   by the `garch-report` binary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Data flows strictly forward: prices → returns → fitted model →
//!   residuals → diagnostics. No stage reads back from a later one.
//! - Every entity is immutable after construction; re-fitting produces a
//!   new `FittedModel`.
//!
//! Conventions
//! -----------
//! - Each module exposes its own error enum and `…Result<T>` alias, plus a
//!   `prelude`.
//! - Library code logs through `tracing`; installing a subscriber is the
//!   caller's job.

pub mod inference;
pub mod optimization;
pub mod report;
pub mod returns;
pub mod statistical_tests;
pub mod volatility;

pub mod prelude {
    pub use crate::report::prelude::*;
    pub use crate::returns::prelude::*;
    pub use crate::statistical_tests::prelude::*;
    pub use crate::volatility::prelude::*;
}
