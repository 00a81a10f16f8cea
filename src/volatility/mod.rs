//! volatility — GARCH(p, q) conditional-variance stack: core numerics,
//! models, and errors.
//!
//! Purpose
//! -------
//! Provide the conditional-variance layer of the pipeline: configuration
//! ([`ModelSpec`]), the variance recursion and innovation densities in
//! [`core`], and likelihood maximization and fitted results in [`models`].
//!
//! Key behaviors
//! -------------
//! - `σ²_t = ω + Σ α_i ε²_{t−i} + Σ β_j σ²_{t−j}`, seeded with the sample
//!   variance, with Normal, Student-t or skewed Student-t innovations.
//! - [`Fitter::fit`] returns an immutable [`FittedModel`] or one of the
//!   taxonomy errors in [`GarchError`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every parameter set the optimizer can reach is positive and strictly
//!   stationary; see `core::workspace`.
//! - Scratch buffers are single-owner and not thread-safe; each fit builds
//!   its own.
//!
//! Conventions
//! -----------
//! - Returns are percentage log returns (see `returns`).
//! - Errors are [`GarchResult`] / [`ParamResult`].

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    GarchData, GarchOptions, GarchParams, GarchShape, Innovation, ModelSpec, StartingValues,
    VarianceForecast, VarianceGuards,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{FittedModel, Fitter, GarchModel, StandardizedResiduals, fit};

pub mod prelude {
    pub use super::{
        FittedModel, Fitter, GarchData, GarchError, GarchOptions, GarchParams, GarchResult,
        GarchShape, Innovation, ModelSpec, StandardizedResiduals, StartingValues,
        VarianceForecast, fit,
    };
}
