//! core — GARCH(p, q) building blocks: shapes, parameters, densities and the
//! variance recursion.
//!
//! Purpose
//! -------
//! Collect the numerical and structural primitives the GARCH models are
//! assembled from: the model order and configuration, the owned parameter
//! set and its θ-mapping, the innovation densities (including the skewed
//! Student-t), the in-sample variance recursion with its sensitivities, and
//! out-of-sample variance forecasts.
//!
//! Key behaviors
//! -------------
//! - Configuration: [`GarchShape`], [`Innovation`], [`GarchOptions`],
//!   [`StartingValues`], [`VarianceGuards`] and the bundling [`ModelSpec`].
//! - Parameters: [`GarchParams`] (validated, owned), [`WorkSpace`]
//!   (zero-copy θ-map) and [`GarchScratch`] (reusable buffers).
//! - Numerics: [`SkewT`] and [`InnovationDensity`] for log-densities and
//!   scores; [`fill_variance`] / [`fill_variance_with_derivatives`] for the
//!   recursion; [`forecast_recursion`] for forecasts.
//! - Data: [`GarchData`] carries the returns and the seed moments.
//!
//! Invariants & assumptions
//! ------------------------
//! - `p ≥ 1` ARCH terms, `q ≥ 0` GARCH terms.
//! - Every parameter set reachable from θ satisfies `ω > 0`, `α, β ≥ 0`,
//!   `Σα + Σβ < 1`, `ν > 2` and `|λ| < 1`.
//! - The recursion seed is the sample variance and never depends on θ.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; lag `k` of observation `t` is index `t − k`.
//! - θ layout is `(μ, θ_ω, θ_α[0..p), θ_β[0..q), θ_ν?, θ_λ?)`.
//! - This module performs no I/O and no logging.

pub mod data;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod innovations;
pub mod model_spec;
pub mod options;
pub mod params;
pub mod shape;
pub mod skew_t;
pub mod validation;
pub mod variance;
pub mod workspace;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::GarchData;
pub use self::forecasts::{VarianceForecast, forecast_recursion};
pub use self::guards::VarianceGuards;
pub use self::init::StartingValues;
pub use self::innovations::{Innovation, InnovationDensity};
pub use self::model_spec::ModelSpec;
pub use self::options::GarchOptions;
pub use self::params::{GarchParams, GarchScratch, LAMBDA_BOUND, NU_MIN, OMEGA_FLOOR};
pub use self::shape::GarchShape;
pub use self::skew_t::{SkewT, SkewTScore, density, log_likelihood};
pub use self::variance::{fill_variance, fill_variance_with_derivatives, variance_path};
pub use self::workspace::WorkSpace;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::GarchData;
    pub use super::forecasts::VarianceForecast;
    pub use super::guards::VarianceGuards;
    pub use super::init::StartingValues;
    pub use super::innovations::Innovation;
    pub use super::model_spec::ModelSpec;
    pub use super::options::GarchOptions;
    pub use super::params::GarchParams;
    pub use super::shape::GarchShape;
    pub use super::skew_t::SkewT;
}
