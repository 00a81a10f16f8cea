//! inference — uncertainty quantification for maximum-likelihood estimates.
//!
//! Purpose
//! -------
//! Provide the post-fit inference layer: parameter covariance from the
//! observed information and the coefficient table built from it. Model
//! layers supply the gradient of their average log-likelihood and map the
//! resulting θ-space covariance into model space with the delta method
//! (`optimization::numerical_stability::transformations::delta_method`).
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`]: `J(θ̂)⁺ / n` via finite-difference Hessians and an
//!   eigenvalue-truncated pseudo-inverse.
//! - [`standard_errors`]: square roots of the covariance diagonal.
//! - [`coefficient_table`]: estimate, SE, t-statistic, normal p-value.
//!
//! Conventions
//! -----------
//! - Hessians are taken on the average log-likelihood scale; the sample
//!   size rescaling happens once, inside [`calc_covariance`].
//! - Errors are reported as [`InferenceError`].

pub mod coefficients;
pub mod errors;
pub mod hessian;

pub use self::coefficients::{CoefficientRow, coefficient_table};
pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, standard_errors};

pub mod prelude {
    pub use super::coefficients::{CoefficientRow, coefficient_table};
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, standard_errors};
}
