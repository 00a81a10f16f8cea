//! Jarque–Bera normality test.
//!
//! `JB = n/6 · (S² + K²/4)` with `S` the biased sample skewness and `K` the
//! biased excess kurtosis; the reference distribution is `χ²(2)`, whose
//! survival function is `exp(−JB/2)`.
use crate::statistical_tests::{errors::DiagResult, moments::Moments};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JarqueBeraOutcome {
    pub stat: f64,
    pub p_value: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
}

/// # Errors
/// `InsufficientData` (n < 2), `NonFiniteData`, `DegenerateData`.
pub fn jarque_bera(data: &[f64]) -> DiagResult<JarqueBeraOutcome> {
    let m = Moments::from_slice(data)?;
    let (s, k) = (m.skewness, m.excess_kurtosis);
    let stat = m.n as f64 / 6.0 * (s * s + 0.25 * k * k);
    let p_value = ChiSquared::new(2.0)?.sf(stat);
    Ok(JarqueBeraOutcome { stat, p_value, skewness: s, excess_kurtosis: k })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::errors::DiagnosticError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the statistic on a hand-computed sample, the χ²(2)
    // p-value, and degenerate input.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check JB and its p-value by hand.
    //
    // Given
    // -----
    // - [1, 2, 3, 4, 10]: S = 1.138420, K = −0.212.
    //
    // Expect
    // ------
    // - JB = 5/6·(S² + K²/4) ≈ 1.089363 and p = exp(−JB/2) ≈ 0.580026.
    fn jarque_bera_matches_hand_computation() {
        // Act
        let out = jarque_bera(&[1.0, 2.0, 3.0, 4.0, 10.0]).expect("valid data");

        // Assert
        assert_relative_eq!(out.stat, 1.0893633333, epsilon = 1e-9);
        assert_relative_eq!(out.p_value, 0.5800263957, epsilon = 1e-9);
        assert_relative_eq!(out.excess_kurtosis, -0.212, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a constant sample is degenerate rather than NaN.
    //
    // Given
    // -----
    // - Eight zeros.
    //
    // Expect
    // ------
    // - `DegenerateData`.
    fn jarque_bera_rejects_constant_sample() {
        // Act & Assert
        assert!(matches!(jarque_bera(&[0.0; 8]), Err(DiagnosticError::DegenerateData { .. })));
    }
}
