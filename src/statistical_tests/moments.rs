//! Sample moments and the descriptive summary of a return series.
//!
//! Purpose
//! -------
//! Provide the moment estimates used by the normality test and the
//! pre-fit description of the raw returns.
//!
//! Key behaviors
//! -------------
//! - [`Moments`]: population (biased) central moments, skewness
//!   `g₁ = m₃/m₂^{3/2}` and excess kurtosis `g₂ = m₄/m₂² − 3`. These are the
//!   inputs of Jarque–Bera.
//! - [`DescriptiveStats::describe`]: count, mean, sample standard deviation
//!   (divisor n − 1), min, linear-interpolated quartiles, max, and the
//!   bias-adjusted skewness `G₁` and kurtosis `G₂ + 3`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is validated: finite, long enough, positive variance.
//! - `G₁` needs n ≥ 3 and `G₂` needs n ≥ 4; `describe` requires n ≥ 4.
use crate::statistical_tests::{
    errors::DiagResult,
    validation::{validate_series, validate_variance},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub n: usize,
    pub mean: f64,
    /// Population variance `m₂`.
    pub variance: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
}

impl Moments {
    /// # Errors
    /// `InsufficientData` for n < 2, `NonFiniteData`, `DegenerateData`.
    pub fn from_slice(data: &[f64]) -> DiagResult<Moments> {
        validate_series(data, 2)?;
        let n = data.len();
        let nf = n as f64;
        let mean = data.iter().sum::<f64>() / nf;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &x in data {
            let d = x - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        let (m2, m3, m4) = (m2 / nf, m3 / nf, m4 / nf);
        validate_variance(m2, mean)?;
        Ok(Moments {
            n,
            mean,
            variance: m2,
            skewness: m3 / m2.powf(1.5),
            excess_kurtosis: m4 / (m2 * m2) - 3.0,
        })
    }
}

/// Summary table of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
    /// Bias-adjusted sample skewness `G₁`.
    pub skewness: f64,
    /// Bias-adjusted excess kurtosis plus 3 (normal = 3).
    pub kurtosis: f64,
}

impl DescriptiveStats {
    /// # Errors
    /// `InsufficientData` for n < 4, `NonFiniteData`, `DegenerateData`.
    pub fn describe(data: &[f64]) -> DiagResult<DescriptiveStats> {
        validate_series(data, 4)?;
        let m = Moments::from_slice(data)?;
        let n = m.n as f64;

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let skewness = m.skewness * (n * (n - 1.0)).sqrt() / (n - 2.0);
        let excess = ((n + 1.0) * m.excess_kurtosis + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0));

        Ok(DescriptiveStats {
            count: m.n,
            mean: m.mean,
            std: (m.variance * n / (n - 1.0)).sqrt(),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            skewness,
            kurtosis: excess + 3.0,
        })
    }
}

// ---- Helper methods ----

/// Linear interpolation at position `(n − 1)·prob`.
fn quantile_sorted(sorted: &[f64], prob: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * prob;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
