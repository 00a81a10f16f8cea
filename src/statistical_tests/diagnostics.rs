//! Residual diagnostics bundle.
//!
//! [`DiagnosticReport`] runs Ljung–Box on `z_t` and `z_t²` at the requested
//! lags and Jarque–Bera on `z_t`. It is produced once from a fitted model's
//! standardized residuals and never mutated.
use crate::{
    statistical_tests::{
        errors::DiagResult,
        jarque_bera::{JarqueBeraOutcome, jarque_bera},
        ljung_box::{LjungBoxOutcome, ljung_box},
    },
    volatility::models::StandardizedResiduals,
};
use serde::Serialize;
use tracing::{info, info_span};

/// Default portmanteau lags.
pub const DEFAULT_LAGS: [usize; 2] = [10, 20];

/// Portmanteau and normality tests on one residual sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    /// Number of residuals tested.
    pub n: usize,
    /// Ljung–Box on `z_t` (mean dependence).
    pub ljung_box_residuals: Vec<LjungBoxOutcome>,
    /// Ljung–Box on `z_t²` (volatility dependence).
    pub ljung_box_squared: Vec<LjungBoxOutcome>,
    /// Jarque–Bera on `z_t`. Under skewed or fat-tailed innovations a
    /// rejection is expected and does not indicate a misfit.
    pub jarque_bera: JarqueBeraOutcome,
}

impl DiagnosticReport {
    /// Run every diagnostic on a raw residual slice.
    ///
    /// Parameters
    /// ----------
    /// - `z`: `&[f64]`
    ///   Standardized residuals, in time order.
    /// - `lags`: `&[usize]`
    ///   Ljung–Box lags, applied to both `z` and `z²`. Each must satisfy
    ///   `1 ≤ lag < z.len()`.
    ///
    /// Returns
    /// -------
    /// `DiagResult<DiagnosticReport>`
    ///   One Ljung–Box outcome per lag for each sequence, in `lags` order,
    ///   plus Jarque–Bera on `z`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData`, `NonFiniteData` or `DegenerateData` when `z`
    ///   (or `z²`) cannot be tested.
    /// - `EmptyLags`, `InvalidLag` for bad lag requests.
    pub fn from_residuals(z: &[f64], lags: &[usize]) -> DiagResult<DiagnosticReport> {
        let _span = info_span!("diagnostics", n = z.len()).entered();
        let squared: Vec<f64> = z.iter().map(|v| v * v).collect();
        let report = DiagnosticReport {
            n: z.len(),
            ljung_box_residuals: ljung_box(z, lags)?,
            ljung_box_squared: ljung_box(&squared, lags)?,
            jarque_bera: jarque_bera(z)?,
        };
        info!(
            jb_p = report.jarque_bera.p_value,
            lb_sq_p = ?report.ljung_box_squared.iter().map(|o| o.p_value).collect::<Vec<_>>(),
            "diagnostics done"
        );
        Ok(report)
    }

    /// [`DiagnosticReport::from_residuals`] on a fitted model's residuals.
    pub fn from_standardized(
        residuals: &StandardizedResiduals, lags: &[usize],
    ) -> DiagResult<DiagnosticReport> {
        DiagnosticReport::from_residuals(&residuals.values().to_vec(), lags)
    }

    /// Ljung–Box on `z_t²` at `lag`, if that lag was requested.
    pub fn squared_at(&self, lag: usize) -> Option<&LjungBoxOutcome> {
        self.ljung_box_squared.iter().find(|o| o.lag == lag)
    }

    /// Ljung–Box on `z_t` at `lag`, if that lag was requested.
    pub fn residuals_at(&self, lag: usize) -> Option<&LjungBoxOutcome> {
        self.ljung_box_residuals.iter().find(|o| o.lag == lag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::errors::DiagnosticError;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover wiring: which sequence each test sees, lag lookup,
    // and error propagation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the squared-residual test runs on z² and lag lookup works.
    //
    // Given
    // -----
    // - z alternating in magnitude (1, 3, 1, 3, …) with random-looking signs.
    //
    // Expect
    // ------
    // - z² alternates perfectly, so the squared test rejects at lag 1.
    // - Lag lookup returns the requested entries only.
    fn report_tests_squared_residuals() {
        // Arrange
        let signs = [1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0, -1.0];
        let z: Vec<f64> = (0..200)
            .map(|t| signs[t % signs.len()] * if t % 2 == 0 { 1.0 } else { 3.0 })
            .collect();
        let residuals = StandardizedResiduals::new(Array1::from(z));

        // Act
        let report = DiagnosticReport::from_standardized(&residuals, &[1, 5]).expect("valid");

        // Assert
        assert_eq!(report.n, 200);
        assert!(report.squared_at(1).expect("requested").p_value < 1e-6);
        assert!(report.residuals_at(5).is_some());
        assert!(report.squared_at(10).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid lags abort the report.
    //
    // Given
    // -----
    // - Ten residuals and lag 20.
    //
    // Expect
    // ------
    // - `InvalidLag`.
    fn report_propagates_lag_errors() {
        // Arrange
        let z = [0.1, -0.4, 0.3, 1.2, -0.8, 0.05, -1.1, 0.7, 0.2, -0.3];

        // Act
        let res = DiagnosticReport::from_residuals(&z, &DEFAULT_LAGS);

        // Assert
        assert!(matches!(res, Err(DiagnosticError::InvalidLag { lag: 10, .. })));
    }
}
