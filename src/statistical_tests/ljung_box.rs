//! Ljung–Box portmanteau test for serial correlation.
//!
//! Purpose
//! -------
//! Test the joint null that the first `L` autocorrelations of a sequence
//! are zero. Applied to standardized residuals it checks leftover mean
//! dependence; applied to squared residuals it checks leftover volatility
//! clustering, the primary adequacy check for a variance model.
//!
//! Key behaviors
//! -------------
//! - Sample autocorrelations use the full-sample denominator
//!   `ρ̂_k = Σ_{t=k}^{n−1} (x_t − x̄)(x_{t−k} − x̄) / Σ_t (x_t − x̄)²`.
//! - `Q(L) = n(n + 2) Σ_{k=1}^{L} ρ̂_k² / (n − k)`, referred to `χ²(L)`.
//! - Several lags are evaluated from a single autocorrelation pass up to
//!   the largest requested lag.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input must be finite with at least 2 observations and positive
//!   variance; every lag must satisfy `1 ≤ L < n`.
//!
//! Conventions
//! -----------
//! - Outcomes are returned in the order the lags were requested.
//! - p-values are upper-tail survival probabilities.
use crate::statistical_tests::{
    errors::DiagResult,
    validation::{validate_lags, validate_series, validate_variance},
};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// LjungBoxOutcome — Q-statistic and p-value at one lag.
///
/// Fields
/// ------
/// - `lag`: `usize`
///   Number of autocorrelations pooled (degrees of freedom of the
///   reference χ²).
/// - `stat`: `f64`
///   `Q(lag)`, non-negative.
/// - `p_value`: `f64`
///   `P[χ²(lag) > Q]`, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LjungBoxOutcome {
    pub lag: usize,
    pub stat: f64,
    pub p_value: f64,
}

/// Ljung–Box test at each requested lag.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Sequence to test (typically `z_t` or `z_t²`). Finite, length ≥ 2.
/// - `lags`: `&[usize]`
///   Non-empty set of lags, each `1 ≤ L < data.len()`.
///
/// Returns
/// -------
/// `DiagResult<Vec<LjungBoxOutcome>>`
///   One outcome per lag, in request order.
///
/// Errors
/// ------
/// - `InsufficientData`, `NonFiniteData` from input validation.
/// - `EmptyLags`, `InvalidLag` for bad lag requests.
/// - `DegenerateData` when the sequence is constant.
pub fn ljung_box(data: &[f64], lags: &[usize]) -> DiagResult<Vec<LjungBoxOutcome>> {
    validate_series(data, 2)?;
    let n = data.len();
    validate_lags(lags, n)?;
    let mean = data.iter().sum::<f64>() / n as f64;
    let denom: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    validate_variance(denom / n as f64, mean)?;

    let max_lag = lags.iter().copied().max().unwrap_or(0);
    let acf = autocorrelations(data, mean, denom, max_lag);

    let nf = n as f64;
    let mut cumulative = Vec::with_capacity(max_lag + 1);
    cumulative.push(0.0);
    for (k, rho) in acf.iter().enumerate() {
        let lag = k + 1;
        let prev = cumulative[k];
        cumulative.push(prev + rho * rho / (nf - lag as f64));
    }

    lags.iter()
        .map(|&lag| -> DiagResult<LjungBoxOutcome> {
            let stat = nf * (nf + 2.0) * cumulative[lag];
            let p_value = ChiSquared::new(lag as f64)?.sf(stat);
            Ok(LjungBoxOutcome { lag, stat, p_value })
        })
        .collect()
}

// ---- Helper methods ----

/// `ρ̂_1 … ρ̂_max_lag`.
fn autocorrelations(data: &[f64], mean: f64, denom: f64, max_lag: usize) -> Vec<f64> {
    (1..=max_lag)
        .map(|k| {
            data[k..]
                .iter()
                .zip(data)
                .map(|(x_t, x_t_min_k)| (x_t - mean) * (x_t_min_k - mean))
                .sum::<f64>()
                / denom
        })
        .collect()
}
