//! Fitted GARCH model and the residuals derived from it.
//!
//! A [`FittedModel`] is created once per fit and never mutated: it owns the
//! estimated parameters, the in-sample conditional variances (one per
//! return, same alignment), the log-likelihood at the optimum, and the
//! optional parameter covariance. Everything else (residuals, volatility,
//! information criteria, forecasts, the coefficient table) is derived on
//! demand from those values.
use crate::{
    inference::{CoefficientRow, InferenceResult, coefficient_table},
    volatility::{
        core::{
            forecasts::{VarianceForecast, forecast_recursion},
            model_spec::ModelSpec,
            params::GarchParams,
        },
        errors::{GarchError, GarchResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1};

/// `z_t = (r_t − μ) / σ_t`, aligned with the return series.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedResiduals {
    values: Array1<f64>,
}

impl StandardizedResiduals {
    pub fn new(values: Array1<f64>) -> StandardizedResiduals {
        StandardizedResiduals { values }
    }

    /// `z_t` in time order.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// `z_t²`, the input of the volatility-adequacy checks.
    pub fn squared(&self) -> Array1<f64> {
        self.values.mapv(|z| z * z)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Post-fit summary of the optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDiagnostics {
    pub iterations: usize,
    /// Solver termination reason, e.g. `"SolverConverged"`.
    pub status: String,
    /// `‖∇ℓ‖₂` at the optimum, when the solver reports a gradient.
    pub grad_norm: Option<f64>,
}

/// FittedModel
///
/// Purpose
/// -------
/// Immutable result of one successful fit.
///
/// Fields
/// ------
/// - `spec`: the fitted [`ModelSpec`].
/// - `params`: estimates in model space.
/// - `returns`, `sigma2`: the sample and its in-sample `σ²_t`, same length.
/// - `seed`: sample variance used for presample values, reused by
///   forecasts.
/// - `residuals`: `z_t`, computed once at construction.
/// - `loglik`: full-sample log-likelihood (not the average).
/// - `covariance`: model-space covariance, `None` when unavailable.
/// - `fit`: optimizer summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    spec: ModelSpec,
    params: GarchParams,
    returns: Array1<f64>,
    seed: f64,
    sigma2: Array1<f64>,
    residuals: StandardizedResiduals,
    loglik: f64,
    covariance: Option<Array2<f64>>,
    fit: FitDiagnostics,
}

impl FittedModel {
    /// Assembles a fitted model from already validated pieces.
    ///
    /// # Errors
    /// - [`GarchError::LengthMismatch`] if `sigma2` and `returns` differ in
    ///   length.
    /// - [`GarchError::InvalidVariance`] on the first σ²_t that is not
    ///   finite and strictly positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spec: ModelSpec, params: GarchParams, returns: Array1<f64>, seed: f64,
        sigma2: Array1<f64>, loglik: f64, covariance: Option<Array2<f64>>, fit: FitDiagnostics,
    ) -> GarchResult<FittedModel> {
        if returns.len() != sigma2.len() {
            return Err(GarchError::LengthMismatch {
                expected: returns.len(),
                actual: sigma2.len(),
            });
        }
        if let Some((index, &value)) =
            sigma2.iter().enumerate().find(|(_, s)| !(s.is_finite() && **s > 0.0))
        {
            return Err(GarchError::InvalidVariance { index, value });
        }
        let z = returns.iter().zip(sigma2.iter()).map(|(&r, &s2)| (r - params.mu) / s2.sqrt());
        let residuals = StandardizedResiduals::new(z.collect());
        Ok(FittedModel { spec, params, returns, seed, sigma2, residuals, loglik, covariance, fit })
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    pub fn params(&self) -> &GarchParams {
        &self.params
    }

    /// In-sample `σ²_t`.
    pub fn sigma2(&self) -> ArrayView1<'_, f64> {
        self.sigma2.view()
    }

    /// `σ_t`, in the units of the returns (percent).
    pub fn conditional_volatility(&self) -> Array1<f64> {
        self.sigma2.mapv(f64::sqrt)
    }

    /// `σ_t · √factor`, e.g. `factor = 252` for daily data.
    pub fn annualized_volatility(&self, factor: f64) -> GarchResult<Array1<f64>> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(GarchError::InvalidAnnualization { factor });
        }
        let scale = factor.sqrt();
        Ok(self.sigma2.mapv(|s2| s2.sqrt() * scale))
    }

    /// `z_t`, one per return.
    pub fn standardized_residuals(&self) -> &StandardizedResiduals {
        &self.residuals
    }

    /// Full-sample log-likelihood at the optimum.
    pub fn loglik(&self) -> f64 {
        self.loglik
    }

    pub fn n_obs(&self) -> usize {
        self.returns.len()
    }

    /// `k` in the information criteria, shape parameters included.
    pub fn n_params(&self) -> usize {
        self.spec.n_params()
    }

    /// `2k − 2ℓ`.
    pub fn aic(&self) -> f64 {
        2.0 * self.n_params() as f64 - 2.0 * self.loglik
    }

    /// `k ln n − 2ℓ`.
    pub fn bic(&self) -> f64 {
        self.n_params() as f64 * (self.n_obs() as f64).ln() - 2.0 * self.loglik
    }

    /// `Σα + Σβ`; always below one.
    pub fn persistence(&self) -> f64 {
        self.params.persistence()
    }

    pub fn uncond_variance(&self) -> f64 {
        self.params.uncond_variance()
    }

    /// `σ̂²_{T+1..T+h}`.
    pub fn forecast_variance(&self, horizon: usize) -> GarchResult<VarianceForecast> {
        forecast_recursion(
            &self.params,
            self.returns.view(),
            self.sigma2.view(),
            self.seed,
            horizon,
            &self.spec.options.variance_guards,
        )
    }

    /// Model-space covariance of `(μ, ω, α, β, ν?, λ?)`, if it was computed.
    pub fn covariance(&self) -> Option<&Array2<f64>> {
        self.covariance.as_ref()
    }

    /// Square roots of the covariance diagonal, in [`GarchParams::to_vec`]
    /// order.
    pub fn std_errors(&self) -> Option<Array1<f64>> {
        self.covariance.as_ref().map(crate::inference::standard_errors)
    }

    /// Estimate, standard error, t-statistic and p-value per parameter.
    /// Rows carry `None` inference columns when the covariance is
    /// unavailable.
    ///
    /// # Errors
    /// [`InferenceError::DimensionMismatch`](crate::inference::InferenceError::DimensionMismatch)
    /// if the covariance does not match the parameter count.
    pub fn coefficient_table(&self) -> InferenceResult<Vec<CoefficientRow>> {
        let se = self.std_errors();
        coefficient_table(&self.params.names(), self.params.to_vec().view(), se.as_ref())
    }

    pub fn iterations(&self) -> usize {
        self.fit.iterations
    }

    pub fn status(&self) -> &str {
        &self.fit.status
    }

    pub fn fit_diagnostics(&self) -> &FitDiagnostics {
        &self.fit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::{innovations::Innovation, shape::GarchShape};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Residual standardization and squared residuals.
    // - Volatility scaling and the annualization guard.
    // - Information criteria and the covariance-dependent accessors.
    // - Rejection of invalid variance paths.
    //
    // Fitting itself is covered in the fitter tests.
    // -------------------------------------------------------------------------

    fn fitted(covariance: Option<Array2<f64>>) -> FittedModel {
        let spec = ModelSpec::new(
            GarchShape::new(1, 1).expect("valid shape"),
            Innovation::Normal,
            Default::default(),
        );
        let params = GarchParams::new(0.5, 0.1, array![0.1], array![0.8], None, None)
            .expect("admissible");
        let fit =
            FitDiagnostics { iterations: 7, status: "SolverConverged".into(), grad_norm: None };
        FittedModel::new(
            spec,
            params,
            array![2.5, -1.5, 0.5, 4.5],
            1.0,
            array![4.0, 1.0, 0.25, 4.0],
            -10.0,
            covariance,
            fit,
        )
        .expect("valid fitted model")
    }

    #[test]
    // Purpose
    // -------
    // Verify residuals, volatility and annualization on hand-checked values.
    //
    // Given
    // -----
    // - μ = 0.5, returns [2.5, −1.5, 0.5, 4.5], σ² = [4, 1, 0.25, 4].
    //
    // Expect
    // ------
    // - z = [1, −2, 0, 2], z² = [1, 4, 0, 4].
    // - σ = [2, 1, 0.5, 2] and σ·√4 = 2σ.
    // - A zero annualization factor is rejected.
    fn residuals_and_volatility_follow_definitions() {
        // Arrange
        let m = fitted(None);

        // Act
        let z = m.standardized_residuals();
        let vol = m.conditional_volatility();
        let ann = m.annualized_volatility(4.0).expect("positive factor");

        // Assert
        assert_eq!(z.values().to_vec(), vec![1.0, -2.0, 0.0, 2.0]);
        assert_eq!(z.squared().to_vec(), vec![1.0, 4.0, 0.0, 4.0]);
        assert_eq!(vol.to_vec(), vec![2.0, 1.0, 0.5, 2.0]);
        assert_eq!(ann.to_vec(), vec![4.0, 2.0, 1.0, 4.0]);
        assert_eq!(
            m.annualized_volatility(0.0),
            Err(GarchError::InvalidAnnualization { factor: 0.0 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check AIC and BIC against their definitions.
    //
    // Given
    // -----
    // - k = 4 parameters, n = 4 observations, ℓ = −10.
    //
    // Expect
    // ------
    // - AIC = 28 and BIC = 4 ln 4 + 20.
    fn information_criteria_use_full_loglik() {
        // Arrange
        let m = fitted(None);

        // Act & Assert
        assert_eq!(m.n_params(), 4);
        assert_relative_eq!(m.aic(), 28.0, epsilon = 1e-12);
        assert_relative_eq!(m.bic(), 4.0 * 4.0_f64.ln() + 20.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure inference accessors reflect whether a covariance exists.
    //
    // Given
    // -----
    // - One model without covariance and one with diag(0.01, 0.04, 0.0001, 0.0004).
    //
    // Expect
    // ------
    // - No standard errors and empty p-values for the first.
    // - SEs [0.1, 0.2, 0.01, 0.02] and t(μ) = 5 for the second.
    fn coefficient_table_uses_covariance_when_present() {
        // Arrange
        let without = fitted(None);
        let cov = Array2::from_diag(&array![0.01, 0.04, 0.0001, 0.0004]);
        let with = fitted(Some(cov));

        // Act
        let rows_without = without.coefficient_table().expect("consistent lengths");
        let rows_with = with.coefficient_table().expect("consistent lengths");

        // Assert
        assert!(without.std_errors().is_none());
        assert!(rows_without.iter().all(|r| r.p_value.is_none()));
        let se = with.std_errors().expect("covariance present");
        assert_relative_eq!(se[1], 0.2, epsilon = 1e-12);
        assert_eq!(rows_with[0].name, "mu");
        assert_relative_eq!(rows_with[0].t_stat.expect("has se"), 5.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-positive variance path cannot become a fitted model.
    //
    // Given
    // -----
    // - σ² = [1, 0, 1].
    //
    // Expect
    // ------
    // - `InvalidVariance { index: 1, .. }`.
    fn new_rejects_non_positive_variance() {
        // Arrange
        let params =
            GarchParams::new(0.0, 0.1, array![0.1], array![0.8], None, None).expect("admissible");
        let fit = FitDiagnostics { iterations: 1, status: String::new(), grad_norm: None };

        // Act
        let res = FittedModel::new(
            ModelSpec::default(),
            params,
            array![0.1, 0.2, 0.3],
            1.0,
            array![1.0, 0.0, 1.0],
            0.0,
            None,
            fit,
        );

        // Assert
        assert!(matches!(res, Err(GarchError::InvalidVariance { index: 1, .. })));
    }
}
