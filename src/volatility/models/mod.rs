//! models — GARCH(p, q) likelihood, fitting, and fitted-model results.
//!
//! Purpose
//! -------
//! Sit on top of `volatility::core` and the generic optimizer: expose the
//! likelihood as a [`GarchModel`], estimate it with a [`Fitter`], and hand
//! back an immutable [`FittedModel`] with its [`StandardizedResiduals`].
//!
//! Conventions
//! -----------
//! - θ layout `(μ, θ_ω, θ_α, θ_β, θ_ν?, θ_λ?)`; see `volatility::core`.
//! - Fits log through `tracing` inside a `garch_fit` span.

pub mod fitted;
pub mod fitter;
pub mod garch;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::fitted::{FitDiagnostics, FittedModel, StandardizedResiduals};
pub use self::fitter::{Fitter, fit};
pub use self::garch::GarchModel;

pub mod prelude {
    pub use super::fitted::{FittedModel, StandardizedResiduals};
    pub use super::fitter::{Fitter, fit};
    pub use super::garch::GarchModel;
}
