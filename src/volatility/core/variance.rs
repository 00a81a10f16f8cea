//! Conditional-variance recursion for GARCH(p, q) and its sensitivities.
//!
//! ## Model convention
//! `σ²_t = ω + Σ_{i=1..p} α_i ε²_{t−i} + Σ_{j=1..q} β_j σ²_{t−j}` with
//! `ε_t = r_t − μ`.
//!
//! ## Seeding
//! `σ²_0` and every pre-sample `ε²` / `σ²` (index < 0) equal the sample
//! variance `s²` of the returns. The seed does not depend on θ, so row 0 of
//! the derivative matrix is zero and pre-sample lags contribute no
//! sensitivity.
//!
//! ## What this module does
//! - [`fill_variance`] runs the recursion in place into a caller buffer.
//! - [`fill_variance_with_derivatives`] additionally fills
//!   `∂σ²_t/∂(μ, ω, α₁…α_p, β₁…β_q)` row by row.
//! - Each `σ²_t` is clamped with [`VarianceGuards`]; a clamped row has zero
//!   sensitivity.
//!
//! ## Zero-copy design
//! Both functions write into borrowed views and do not allocate.
use crate::volatility::core::{guards::VarianceGuards, params::GarchParams};
use ndarray::{Array1, ArrayView1, ArrayViewMut1, ArrayViewMut2};

/// Runs the variance recursion into `sigma2` and returns how many
/// observations were clamped.
///
/// `sigma2.len()` must equal `returns.len()`.
pub fn fill_variance(
    returns: ArrayView1<f64>, mu: f64, omega: f64, alpha: ArrayView1<f64>,
    beta: ArrayView1<f64>, seed: f64, guards: &VarianceGuards, mut sigma2: ArrayViewMut1<f64>,
) -> usize {
    let n = returns.len();
    if n == 0 {
        return 0;
    }
    let (first, clamped0) = guards.guard(seed);
    sigma2[0] = first;
    let mut clamped = clamped0 as usize;

    for t in 1..n {
        let mut s2 = omega;
        for (i, &a) in alpha.iter().enumerate() {
            let lag = i + 1;
            s2 += a * if t >= lag { (returns[t - lag] - mu).powi(2) } else { seed };
        }
        for (j, &b) in beta.iter().enumerate() {
            let lag = j + 1;
            s2 += b * if t >= lag { sigma2[t - lag] } else { seed };
        }
        let (value, hit) = guards.guard(s2);
        sigma2[t] = value;
        clamped += hit as usize;
    }
    clamped
}

/// Runs the variance recursion and fills the sensitivity matrix.
///
/// `deriv` has shape `(n, 2 + p + q)` with columns `μ, ω, α…, β…`.
pub fn fill_variance_with_derivatives(
    returns: ArrayView1<f64>, mu: f64, omega: f64, alpha: ArrayView1<f64>,
    beta: ArrayView1<f64>, seed: f64, guards: &VarianceGuards, mut sigma2: ArrayViewMut1<f64>,
    mut deriv: ArrayViewMut2<f64>,
) -> usize {
    let n = returns.len();
    let p = alpha.len();
    let ncols = deriv.ncols();
    deriv.fill(0.0);
    let clamped = fill_variance(returns, mu, omega, alpha, beta, seed, guards, sigma2.view_mut());
    if n == 0 {
        return clamped;
    }

    for t in 1..n {
        let raw = raw_variance(returns, mu, omega, alpha, beta, seed, sigma2.view(), t);
        if guards.guard(raw).1 {
            continue;
        }
        for c in 0..ncols {
            let mut acc = match c {
                0 => alpha
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| t > *i)
                    .map(|(i, &a)| -2.0 * a * (returns[t - i - 1] - mu))
                    .sum(),
                1 => 1.0,
                c if c < 2 + p => {
                    let lag = c - 1;
                    if t >= lag { (returns[t - lag] - mu).powi(2) } else { seed }
                }
                c => {
                    let lag = c - 1 - p;
                    if t >= lag { sigma2[t - lag] } else { seed }
                }
            };
            for (j, &b) in beta.iter().enumerate() {
                let lag = j + 1;
                if t >= lag {
                    acc += b * deriv[[t - lag, c]];
                }
            }
            deriv[[t, c]] = acc;
        }
    }
    clamped
}

/// Owned variance path for fitted parameters.
pub fn variance_path(
    params: &GarchParams, returns: ArrayView1<f64>, seed: f64, guards: &VarianceGuards,
) -> Array1<f64> {
    let mut sigma2 = Array1::zeros(returns.len());
    fill_variance(
        returns,
        params.mu,
        params.omega,
        params.alpha.view(),
        params.beta.view(),
        seed,
        guards,
        sigma2.view_mut(),
    );
    sigma2
}

// ---- Helper methods ----

/// Unclamped `σ²_t` given the already-filled (clamped) history.
fn raw_variance(
    returns: ArrayView1<f64>, mu: f64, omega: f64, alpha: ArrayView1<f64>,
    beta: ArrayView1<f64>, seed: f64, sigma2: ArrayView1<f64>, t: usize,
) -> f64 {
    let arch: f64 = alpha
        .iter()
        .enumerate()
        .map(|(i, &a)| a * if t > i { (returns[t - i - 1] - mu).powi(2) } else { seed })
        .sum();
    let garch: f64 = beta
        .iter()
        .enumerate()
        .map(|(j, &b)| b * if t > j { sigma2[t - j - 1] } else { seed })
        .sum();
    omega + arch + garch
}
