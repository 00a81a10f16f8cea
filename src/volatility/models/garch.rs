//! GARCH(p, q) model: analytic average log-likelihood and gradient.
//!
//! This module wires a [`ModelSpec`] to the `LogLikelihood` trait. A
//! zero-copy [`WorkSpace`] maps optimizer parameters θ into model parameters
//! `(μ, ω, α, β, ν?, λ?)`, the variance recursion runs into shared scratch
//! buffers, and the objective and its **analytic gradient** are accumulated
//! observation by observation.
//!
//! Key ideas:
//! - The objective is the *average* log-likelihood
//!   `ℓ̄(θ) = (1/n) Σ_t [ln g(z_t) − ½ ln σ²_t]`, `z_t = (r_t − μ)/σ_t`,
//!   which keeps gradient tolerances independent of the sample length.
//! - The gradient uses the chain rule:
//!   1) `∂ℓ_t/∂σ²_t = −(g′(z)/g(z)·z + 1) / (2σ²_t)` times the variance
//!      sensitivities, plus the direct `−(g′/g)/σ_t` term in μ;
//!   2) the shape scores in ν and λ;
//!   3) the Jacobians of softplus, the scaled softmax and the ν/λ maps.
//! - The recursion seed is the sample variance held by [`GarchData`].
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Grad, LogLikelihood, Theta},
        numerical_stability::transformations::{safe_logistic, safe_softmax_deriv},
    },
    volatility::core::{
        data::GarchData,
        model_spec::ModelSpec,
        params::{GarchScratch, LAMBDA_BOUND},
        validation::validate_theta,
        variance::{fill_variance, fill_variance_with_derivatives},
        workspace::WorkSpace,
    },
};
use ndarray::{Array1, s};

/// GARCH(p, q) likelihood with preallocated scratch buffers.
///
/// # Notes
/// - Buffers are resized on demand, so one model can evaluate samples of
///   different lengths.
/// - Not thread-safe: the scratch space sits behind `RefCell`s.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchModel {
    pub spec: ModelSpec,
    pub scratch: GarchScratch,
}

impl GarchModel {
    /// Builds a model with scratch space sized for `n` observations.
    pub fn new(spec: ModelSpec, n: usize) -> GarchModel {
        let scratch = GarchScratch::new(n, &spec.shape);
        GarchModel { spec, scratch }
    }

    /// Full-sample log-likelihood `Σ_t ℓ_t` at θ.
    pub fn total_loglik(&self, theta: &Theta, data: &GarchData) -> OptResult<f64> {
        Ok(self.value(theta, data)? * data.len() as f64)
    }

    /// `−∇ℓ̄(θ)`, with NaN entries when θ cannot be evaluated.
    ///
    /// Used as the gradient closure for observed-information Hessians, which
    /// need an infallible `Fn(&Theta) -> Grad`; the NaNs make the Hessian
    /// validation fail instead of silently producing a covariance.
    pub fn neg_grad_or_nan(&self, theta: &Theta, data: &GarchData) -> Grad {
        match self.grad(theta, data) {
            Ok(g) => -g,
            Err(_) => Array1::from_elem(theta.len(), f64::NAN),
        }
    }
}

impl LogLikelihood for GarchModel {
    type Data = GarchData;

    /// Average log-likelihood `ℓ̄(θ)`.
    ///
    /// # Errors
    /// - Parameter errors from the θ-map.
    /// - [`OptError::NonFiniteCost`] if the accumulated value is NaN/∞.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let returns = data.returns();
        let n = returns.len();
        let mut alpha_buf = self.scratch.alpha_buf.borrow_mut();
        let mut beta_buf = self.scratch.beta_buf.borrow_mut();
        let mut ws = WorkSpace::new(
            alpha_buf.view_mut(),
            beta_buf.view_mut(),
            &self.spec.shape,
            self.spec.innovation,
        )?;
        ws.update(theta.view())?;
        let density = self.spec.innovation.density(ws.nu, ws.lambda)?;

        self.scratch.ensure_len(n);
        let mut sigma2 = self.scratch.sigma2_buf.borrow_mut();
        fill_variance(
            returns,
            ws.mu,
            ws.omega,
            ws.alpha.view(),
            ws.beta.view(),
            data.sample_var(),
            &self.spec.options.variance_guards,
            sigma2.view_mut(),
        );

        let total: f64 = returns
            .iter()
            .zip(sigma2.iter())
            .map(|(&r, &s2)| density.log_density((r - ws.mu) / s2.sqrt()) - 0.5 * s2.ln())
            .sum();
        let avg = total / n as f64;
        if !avg.is_finite() {
            return Err(OptError::NonFiniteCost { value: avg });
        }
        Ok(avg)
    }

    /// Checks θ length and finiteness and that it maps to admissible
    /// parameters.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), &self.spec.shape, self.spec.innovation)?;
        let mut alpha_buf = self.scratch.alpha_buf.borrow_mut();
        let mut beta_buf = self.scratch.beta_buf.borrow_mut();
        let mut ws = WorkSpace::new(
            alpha_buf.view_mut(),
            beta_buf.view_mut(),
            &self.spec.shape,
            self.spec.innovation,
        )?;
        ws.update(theta.view())?;
        Ok(())
    }

    /// Analytic `∇ℓ̄(θ)`.
    ///
    /// # Steps
    /// 1. Map θ → `(μ, ω, α, β, ν?, λ?)` via [`WorkSpace`].
    /// 2. Run the variance recursion and its sensitivities into scratch.
    /// 3. Accumulate model-space scores over observations.
    /// 4. Chain to θ: `σ(θ_ω)` for ω, the scaled-softmax Jacobian for
    ///    `(α, β)`, `σ(θ_ν)` for ν and `0.999·(1 − tanh²θ_λ)` for λ.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let (p, q) = (self.spec.shape.p, self.spec.shape.q);
        let k = 2 + p + q;
        let returns = data.returns();
        let n = returns.len();
        let mut alpha_buf = self.scratch.alpha_buf.borrow_mut();
        let mut beta_buf = self.scratch.beta_buf.borrow_mut();
        let mut ws = WorkSpace::new(
            alpha_buf.view_mut(),
            beta_buf.view_mut(),
            &self.spec.shape,
            self.spec.innovation,
        )?;
        ws.update(theta.view())?;
        let density = self.spec.innovation.density(ws.nu, ws.lambda)?;

        self.scratch.ensure_len(n);
        let mut sigma2 = self.scratch.sigma2_buf.borrow_mut();
        let mut deriv = self.scratch.deriv_buf.borrow_mut();
        fill_variance_with_derivatives(
            returns,
            ws.mu,
            ws.omega,
            ws.alpha.view(),
            ws.beta.view(),
            data.sample_var(),
            &self.spec.options.variance_guards,
            sigma2.view_mut(),
            deriv.view_mut(),
        );

        let mut grad = Array1::<f64>::zeros(theta.len());
        for ((&r, &s2), row) in returns.iter().zip(sigma2.iter()).zip(deriv.rows()) {
            let sigma = s2.sqrt();
            let z = (r - ws.mu) / sigma;
            let score = density.score(z);
            let d_s2 = -(score.d_z * z + 1.0) / (2.0 * s2);
            grad.slice_mut(s![..k]).scaled_add(d_s2, &row);
            grad[0] -= score.d_z / sigma;
            if ws.nu.is_some() {
                grad[k] += score.d_nu;
            }
            if ws.lambda.is_some() {
                grad[k + 1] += score.d_lambda;
            }
        }
        grad.mapv_inplace(|g| g / n as f64);

        grad[1] *= safe_logistic(theta[1]);
        safe_softmax_deriv(&ws.alpha.view(), &ws.beta.view(), &mut grad.slice_mut(s![2..k]));
        if ws.nu.is_some() {
            grad[k] *= safe_logistic(theta[k]);
        }
        if ws.lambda.is_some() {
            let th = theta[k + 1].tanh();
            grad[k + 1] *= LAMBDA_BOUND * (1.0 - th * th);
        }
        if let Some((index, &value)) = grad.iter().enumerate().find(|(_, g)| !g.is_finite()) {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "analytic gradient is not finite",
            });
        }
        Ok(grad)
    }
}
