//! numerical_stability — stable transforms between optimizer and model space.
//!
//! Purpose
//! -------
//! Keep the small set of overflow-safe transforms and numeric tolerances that
//! the GARCH parameterization relies on in one place, so the variance model
//! and the inference layer agree on how θ maps to `(ω, α, β, ν, λ)`.
//!
//! Key behaviors
//! -------------
//! - Scalar maps: [`safe_softplus`], [`safe_softplus_inv`], [`safe_logistic`].
//! - Stationarity simplex: [`safe_softmax`] and its Jacobian-vector product
//!   [`safe_softmax_deriv`].
//! - Covariance propagation: [`delta_method`].
//! - Shared tolerances: [`STATIONARITY_MARGIN`], [`LOGIT_EPS`],
//!   [`EIGEN_EPS`], [`GENERAL_TOL`].
//!
//! Conventions
//! -----------
//! - Everything here is pure and allocation-light; shape and domain checks
//!   happen in `volatility::core::validation`.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, LOGIT_EPS, STATIONARITY_MARGIN, delta_method, safe_logistic,
    safe_softmax, safe_softmax_deriv, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, LOGIT_EPS, STATIONARITY_MARGIN, delta_method, safe_logistic,
        safe_softmax, safe_softplus, safe_softplus_inv,
    };
}
