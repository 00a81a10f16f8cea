//! Return sample handed to the GARCH likelihood.
//!
//! [`GarchData`] owns a validated return vector together with the sample
//! moments the recursion is seeded with. Moments are computed once at
//! construction so every likelihood evaluation uses the exact same seed.
use crate::{
    returns::ReturnSeries,
    volatility::{core::validation::validate_returns, errors::GarchResult},
};
use ndarray::{Array1, ArrayView1};

/// Relative threshold below which the sample variance counts as zero.
pub const DEGENERATE_VARIANCE_TOL: f64 = 1e-12;

/// Validated returns (percent) with their sample moments.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchData {
    returns: Array1<f64>,
    sample_mean: f64,
    /// Population variance (divisor n) around `sample_mean`.
    sample_var: f64,
}

impl GarchData {
    /// # Errors
    /// - `InsufficientData` for fewer than two returns.
    /// - `NonFiniteData` on the first NaN or infinite return.
    pub fn new(returns: Array1<f64>) -> GarchResult<Self> {
        validate_returns(returns.view(), 2)?;
        let n = returns.len() as f64;
        let sample_mean = returns.sum() / n;
        let sample_var = returns.iter().map(|r| (r - sample_mean).powi(2)).sum::<f64>() / n;
        Ok(GarchData { returns, sample_mean, sample_var })
    }

    /// Copies the values of a [`ReturnSeries`]; dates are dropped.
    pub fn from_returns(series: &ReturnSeries) -> GarchResult<Self> {
        GarchData::new(series.values().to_owned())
    }

    pub fn returns(&self) -> ArrayView1<'_, f64> {
        self.returns.view()
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn sample_mean(&self) -> f64 {
        self.sample_mean
    }

    /// Seeds `σ²₀` and every presample `ε²` and `σ²`.
    pub fn sample_var(&self) -> f64 {
        self.sample_var
    }

    /// `s² ≤ 1e−12 · max(1, r̄²)`.
    pub fn is_degenerate(&self) -> bool {
        self.sample_var <= DEGENERATE_VARIANCE_TOL * (self.sample_mean * self.sample_mean).max(1.0)
    }
}
