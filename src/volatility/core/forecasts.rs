//! Out-of-sample conditional-variance forecasts.
//!
//! Purpose
//! -------
//! Produce `σ̂²_{T+1}, …, σ̂²_{T+h}` from fitted GARCH(p, q) parameters and
//! the in-sample history, replacing unobserved squared shocks by their
//! conditional expectation `E[ε²_s] = σ̂²_s`.
//!
//! Key behaviors
//! -------------
//! - The one-step forecast uses observed `ε²` and fitted `σ²` only.
//! - Multi-step forecasts decay geometrically towards the unconditional
//!   variance `ω / (1 − Σα − Σβ)` at rate `Σα + Σβ`.
//! - Lags that reach before the sample start use the same seed as the
//!   in-sample recursion.
//!
//! Conventions
//! -----------
//! - `VarianceForecast::sigma2[k] = σ̂²_{T+k+1}` for `k = 0..h`.
use crate::volatility::{
    core::{guards::VarianceGuards, params::GarchParams},
    errors::{GarchError, GarchResult},
};
use ndarray::{Array1, ArrayView1};

#[derive(Debug, Clone, PartialEq)]
pub struct VarianceForecast {
    pub horizon: usize,
    pub sigma2: Array1<f64>,
}

impl VarianceForecast {
    /// `σ̂_{T+k}` for every step.
    pub fn volatility(&self) -> Array1<f64> {
        self.sigma2.mapv(f64::sqrt)
    }

    /// Forecast for the final step.
    pub fn last(&self) -> Option<f64> {
        self.sigma2.last().copied()
    }
}

/// Runs the forecast recursion.
///
/// `returns` and `sigma2` are the in-sample returns and fitted variances
/// (same length), `seed` is the pre-sample variance.
///
/// # Errors
/// - [`GarchError::InvalidHorizon`] for `horizon == 0`.
/// - [`GarchError::LengthMismatch`] if `returns` and `sigma2` differ in length.
pub fn forecast_recursion(
    params: &GarchParams, returns: ArrayView1<f64>, sigma2: ArrayView1<f64>, seed: f64,
    horizon: usize, guards: &VarianceGuards,
) -> GarchResult<VarianceForecast> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    if returns.len() != sigma2.len() {
        return Err(GarchError::LengthMismatch { expected: returns.len(), actual: sigma2.len() });
    }
    let n = returns.len();
    let mut out = Array1::<f64>::zeros(horizon);

    // Index s < n is in-sample, s ≥ n refers to out[s − n].
    let shock = |s: isize, out: &Array1<f64>| -> f64 {
        if s < 0 {
            seed
        } else if (s as usize) < n {
            (returns[s as usize] - params.mu).powi(2)
        } else {
            out[s as usize - n]
        }
    };
    let variance = |s: isize, out: &Array1<f64>| -> f64 {
        if s < 0 {
            seed
        } else if (s as usize) < n {
            sigma2[s as usize]
        } else {
            out[s as usize - n]
        }
    };

    for k in 0..horizon {
        let t = (n + k) as isize;
        let mut s2 = params.omega;
        for (i, &a) in params.alpha.iter().enumerate() {
            s2 += a * shock(t - i as isize - 1, &out);
        }
        for (j, &b) in params.beta.iter().enumerate() {
            s2 += b * variance(t - j as isize - 1, &out);
        }
        out[k] = guards.guard(s2).0;
    }
    Ok(VarianceForecast { horizon, sigma2: out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The one-step forecast on hand-checked values.
    // - Geometric convergence to the unconditional variance.
    // - Horizon and length validation.
    // -------------------------------------------------------------------------

    fn params() -> GarchParams {
        GarchParams::new(0.0, 0.1, array![0.1], array![0.8], None, None).expect("valid params")
    }

    #[test]
    // Purpose
    // -------
    // Check the one-step and two-step forecasts of a GARCH(1, 1).
    //
    // Given
    // -----
    // - Last return 2.0, last fitted variance 1.5.
    //
    // Expect
    // ------
    // - σ̂²_{T+1} = 0.1 + 0.1·4 + 0.8·1.5 = 1.7.
    // - σ̂²_{T+2} = 0.1 + 0.9·1.7.
    fn one_and_two_step_forecasts() {
        // Arrange
        let r = array![0.3, 2.0];
        let s2 = array![1.0, 1.5];

        // Act
        let guards = VarianceGuards::default();
        let f = forecast_recursion(&params(), r.view(), s2.view(), 1.0, 2, &guards)
            .expect("valid inputs");

        // Assert
        assert_relative_eq!(f.sigma2[0], 1.7, epsilon = 1e-14);
        assert_relative_eq!(f.sigma2[1], 0.1 + 0.9 * 1.7, epsilon = 1e-14);
        assert_relative_eq!(f.volatility()[0], 1.7_f64.sqrt(), epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Verify long-horizon forecasts approach the unconditional variance.
    //
    // Given
    // -----
    // - Horizon 400 with persistence 0.9.
    //
    // Expect
    // ------
    // - The last forecast equals ω/(1 − 0.9) = 1.0 to 1e-10.
    fn long_horizon_converges_to_unconditional_variance() {
        // Arrange
        let r = array![3.0, -2.5];
        let s2 = array![4.0, 5.0];

        // Act
        let guards = VarianceGuards::default();
        let f = forecast_recursion(&params(), r.view(), s2.view(), 4.0, 400, &guards)
            .expect("valid inputs");

        // Assert
        let last = f.last().expect("non-empty");
        assert_relative_eq!(last, params().uncond_variance(), epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid horizons and mismatched inputs are rejected.
    //
    // Given
    // -----
    // - Horizon 0, and inputs of lengths 2 and 1.
    //
    // Expect
    // ------
    // - `InvalidHorizon` and `LengthMismatch`.
    fn rejects_invalid_inputs() {
        // Arrange
        let r = array![0.1, 0.2];
        let guards = VarianceGuards::default();

        // Act & Assert
        assert_eq!(
            forecast_recursion(&params(), r.view(), array![1.0, 1.0].view(), 1.0, 0, &guards),
            Err(GarchError::InvalidHorizon { horizon: 0 })
        );
        assert!(matches!(
            forecast_recursion(&params(), r.view(), array![1.0].view(), 1.0, 3, &guards),
            Err(GarchError::LengthMismatch { expected: 2, actual: 1 })
        ));
    }
}
