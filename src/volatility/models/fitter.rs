//! Fitter: maximum-likelihood estimation of a GARCH(p, q) model.
//!
//! Purpose
//! -------
//! Drive the optimizer over a return sample and turn the outcome into a
//! [`FittedModel`], surfacing every failure mode of the pipeline's error
//! taxonomy instead of returning a half-fitted model.
//!
//! Key behaviors
//! -------------
//! - Rejects samples shorter than `n_params + 1` and (near-)constant
//!   samples before optimizing.
//! - Optimizes through the [`Optimizer`] seam; [`Lbfgs`] is the default.
//! - Maps `converged = false` onto [`GarchError::Convergence`].
//! - Optionally computes observed-information standard errors; a failure
//!   there degrades to "unavailable" with a warning.
//!
//! Invariants & assumptions
//! ------------------------
//! - The fit is deterministic for fixed data, spec and starting values.
//! - No state survives between calls: each fit builds its own model and
//!   scratch space.
use crate::{
    inference::calc_covariance,
    optimization::{
        loglik_optimizer::{Lbfgs, Optimizer},
        numerical_stability::transformations::delta_method,
    },
    returns::ReturnSeries,
    volatility::{
        core::{
            data::GarchData, model_spec::ModelSpec, params::GarchParams,
            variance::variance_path,
        },
        errors::{GarchError, GarchResult},
        models::{
            fitted::{FitDiagnostics, FittedModel},
            garch::GarchModel,
        },
    },
};
use ndarray::{Array1, Array2};
use tracing::{debug, info, info_span, warn};

/// Fitter
///
/// Purpose
/// -------
/// Fit one [`ModelSpec`] by maximum likelihood. The optimizer is a type
/// parameter so callers can swap the L-BFGS backend for any [`Optimizer`].
///
/// Fields
/// ------
/// - `spec`: `ModelSpec`
///   Shape, innovation family and fitting options.
/// - `optimizer`: `O`
///   Backend that maximizes the average log-likelihood over θ.
#[derive(Debug, Clone, PartialEq)]
pub struct Fitter<O: Optimizer = Lbfgs> {
    spec: ModelSpec,
    optimizer: O,
}

impl Fitter<Lbfgs> {
    /// L-BFGS configured from `spec.options.mle_opts`.
    pub fn new(spec: ModelSpec) -> Fitter<Lbfgs> {
        let optimizer = Lbfgs::new(spec.options.mle_opts.clone());
        Fitter { spec, optimizer }
    }
}

impl<O: Optimizer> Fitter<O> {
    /// Pair a specification with a caller-supplied optimizer.
    ///
    /// Parameters
    /// ----------
    /// - `spec`: `ModelSpec`
    ///   Model to fit. `spec.options.mle_opts` is ignored by optimizers that
    ///   carry their own settings.
    /// - `optimizer`: `O`
    ///   Any [`Optimizer`]. Its `converged` flag is trusted as reported:
    ///   `false` becomes [`GarchError::Convergence`] in [`Fitter::fit`].
    ///
    /// Returns
    /// -------
    /// `Fitter<O>`
    ///   A stateless fitter; it can be reused across samples.
    pub fn with_optimizer(spec: ModelSpec, optimizer: O) -> Fitter<O> {
        Fitter { spec, optimizer }
    }

    /// The specification being fitted.
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Estimates the model on `data`.
    ///
    /// # Errors
    /// - [`GarchError::InsufficientData`] when `n < n_params + 1`.
    /// - [`GarchError::DegenerateData`] for a (near-)zero sample variance.
    /// - [`GarchError::Convergence`] when the optimizer stops without
    ///   meeting a tolerance.
    /// - [`GarchError::NonStationaryParameters`] if the estimate leaves the
    ///   stationary region.
    /// - [`GarchError::Optimization`] for any other optimizer failure.
    pub fn fit(&self, data: &GarchData) -> GarchResult<FittedModel> {
        let spec = &self.spec;
        let _span = info_span!(
            "garch_fit",
            p = spec.shape.p,
            q = spec.shape.q,
            innovation = %spec.innovation,
            n = data.len()
        )
        .entered();

        let n = data.len();
        let required = spec.n_params() + 1;
        if n < required {
            return Err(GarchError::InsufficientData { len: n, required });
        }
        if data.is_degenerate() {
            return Err(GarchError::DegenerateData { variance: data.sample_var() });
        }

        let start = spec.options.start.resolve(data, &spec.shape, spec.innovation)?;
        let theta0 = start.to_theta(spec.innovation)?;
        debug!(theta0 = ?theta0.to_vec(), "starting values resolved");

        let model = GarchModel::new(spec.clone(), n);
        let outcome = self.optimizer.optimize(&model, theta0, data)?;
        if !outcome.converged {
            return Err(GarchError::Convergence {
                iterations: outcome.iterations,
                status: outcome.status,
            });
        }

        let params =
            GarchParams::from_theta(outcome.theta_hat.view(), &spec.shape, spec.innovation)?;
        let sigma2 = variance_path(
            &params,
            data.returns(),
            data.sample_var(),
            &spec.options.variance_guards,
        );
        let loglik = outcome.value * n as f64;
        let covariance = if spec.options.compute_std_errors {
            model_covariance(&model, data, &outcome.theta_hat, &params)
        } else {
            None
        };

        info!(
            loglik,
            iterations = outcome.iterations,
            persistence = params.persistence(),
            "fit finished"
        );
        let fit = FitDiagnostics {
            iterations: outcome.iterations,
            status: outcome.status,
            grad_norm: outcome.grad_norm,
        };
        FittedModel::new(
            spec.clone(),
            params,
            data.returns().to_owned(),
            data.sample_var(),
            sigma2,
            loglik,
            covariance,
            fit,
        )
    }

    /// [`Fitter::fit`] on a [`ReturnSeries`], after checking its values are
    /// finite.
    pub fn fit_returns(&self, returns: &ReturnSeries) -> GarchResult<FittedModel> {
        self.fit(&GarchData::from_returns(returns)?)
    }
}

/// One-shot fit with the default optimizer.
pub fn fit(returns: &ReturnSeries, spec: &ModelSpec) -> GarchResult<FittedModel> {
    Fitter::new(spec.clone()).fit_returns(returns)
}

// ---- Helper methods ----

/// Model-space covariance via the delta method, or `None` with a warning.
fn model_covariance(
    model: &GarchModel, data: &GarchData, theta_hat: &Array1<f64>, params: &GarchParams,
) -> Option<Array2<f64>> {
    let neg_grad = |theta: &Array1<f64>| model.neg_grad_or_nan(theta, data);
    match calc_covariance(&neg_grad, theta_hat, data.len()) {
        Ok(cov_theta) => Some(delta_method(&cov_theta, &params.theta_jacobian())),
        Err(err) => {
            warn!(error = %err, "standard errors unavailable");
            None
        }
    }
}
