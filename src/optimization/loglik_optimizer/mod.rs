//! loglik_optimizer — maximum-likelihood driver on top of argmin.
//!
//! Purpose
//! -------
//! Turn any [`LogLikelihood`] into a deterministic L-BFGS maximization and
//! return a normalized [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`Optimizer`] abstracts `(objective, initial guess) → parameters`;
//!   [`Lbfgs`] is the production implementation and [`maximize`] the
//!   one-shot helper behind it.
//! - Analytic gradients are used when the objective provides them;
//!   otherwise central (then forward) finite differences of the cost.
//! - `OptimOutcome::converged` is false when the solver stopped on the
//!   iteration cap, so callers can raise a convergence error.
//!
//! Conventions
//! -----------
//! - The optimizer minimizes `c(θ) = −ℓ(θ)`; every value handed back is in
//!   `ℓ` units.
//! - θ is always unconstrained; see `optimization::numerical_stability`
//!   for the maps used by the GARCH model.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{Lbfgs, Optimizer, maximize};
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::{Lbfgs, Optimizer, maximize};
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
