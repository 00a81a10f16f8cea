//! optimization — likelihood maximization stack and its error surface.
//!
//! Purpose
//! -------
//! Provide the numerical optimization layer used by the GARCH fitter: a
//! [`LogLikelihood`](loglik_optimizer::LogLikelihood) trait for objectives,
//! an [`Optimizer`](loglik_optimizer::Optimizer) abstraction that maps
//! `(objective, initial guess) → parameters`, an argmin-backed L-BFGS
//! implementation, finite-difference helpers, and the stable transforms that
//! encode parameter constraints.
//!
//! Key behaviors
//! -------------
//! - Maximize `ℓ(θ)` by minimizing `−ℓ(θ)` with L-BFGS (More–Thuente or
//!   Hager–Zhang line search).
//! - Report whether the run actually met a tolerance, so callers can
//!   distinguish "stopped at the iteration cap" from "converged".
//! - Normalize argmin, finite-difference and parameter-validation failures
//!   into [`OptError`](errors::OptError).
//!
//! Conventions
//! -----------
//! - Constraints are expressed through reparameterization: the optimizer
//!   only ever sees an unconstrained θ, and objectives reject malformed θ in
//!   `LogLikelihood::check`.
//! - Entry points that can fail return [`OptResult<T>`](errors::OptResult).
//! - Progress is logged with `tracing` at `debug` level; the `obs_slog`
//!   feature adds argmin's per-iteration observer.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
