//! GARCH parameters in model space, their θ-mapping, and scratch buffers.
//!
//! Purpose
//! -------
//! Hold the owned parameter set `(μ, ω, α, β, ν, λ)` of a GARCH(p, q) model
//! and convert it to and from the unconstrained θ-vector the optimizer
//! works with. Also provide the per-model scratch buffers used by the
//! likelihood so that repeated evaluations do not allocate.
//!
//! Key behaviors
//! -------------
//! - [`GarchParams::new`] validates model-space values directly and fails
//!   with `StationarityViolated` when `Σα + Σβ ≥ 1`.
//! - [`GarchParams::from_theta`] / [`GarchParams::to_theta`] implement the
//!   θ-map and its inverse (see [`WorkSpace`](super::workspace::WorkSpace)).
//! - [`GarchParams::theta_jacobian`] returns `∂(model params)/∂θ`, used to
//!   push a θ-space covariance to model space with the delta method.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ω > 0`, `α_i, β_j ≥ 0` and `Σα + Σβ < 1`.
//! - `ν > 2` and `|λ| < 1` whenever present.
//! - The inverse map clamps points on the boundary of the θ-image (e.g.
//!   `α_i = 0` or `ν ≤ NU_MIN`) just inside it; round-trips are exact only
//!   for interior points.
//!
//! Conventions
//! -----------
//! - Model-space ordering is `(μ, ω, α₁…α_p, β₁…β_q, ν?, λ?)`, identical to
//!   the θ ordering, so the Jacobian is square.
use crate::{
    optimization::numerical_stability::transformations::{
        LOGIT_EPS, STATIONARITY_MARGIN, safe_softplus_inv,
    },
    volatility::{
        core::{
            innovations::Innovation,
            shape::GarchShape,
            validation::{
                theta_len, validate_alpha, validate_beta, validate_mu, validate_omega,
                validate_stationarity,
            },
            workspace::WorkSpace,
        },
        errors::{ParamError, ParamResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1, s};
use std::cell::RefCell;

/// Lower bound of the degrees of freedom reachable from θ.
pub const NU_MIN: f64 = 2.05;

/// Lower bound of `ω` reachable from θ. Keeps `σ²_t ≥ OMEGA_FLOOR` even when a
/// line-search trial sends `θ_ω` far below the softplus underflow point.
pub const OMEGA_FLOOR: f64 = 1e-8;

/// Bound on `|λ|` reachable from θ.
pub const LAMBDA_BOUND: f64 = 0.999;

/// Reusable buffers for likelihood and gradient evaluation.
///
/// `sigma2_buf` has one entry per observation; `deriv_buf` holds
/// `∂σ²_t/∂(μ, ω, α, β)` row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchScratch {
    pub alpha_buf: RefCell<Array1<f64>>,
    pub beta_buf: RefCell<Array1<f64>>,
    pub sigma2_buf: RefCell<Array1<f64>>,
    pub deriv_buf: RefCell<Array2<f64>>,
}

impl GarchScratch {
    pub fn new(n: usize, shape: &GarchShape) -> GarchScratch {
        GarchScratch {
            alpha_buf: RefCell::new(Array1::zeros(shape.p)),
            beta_buf: RefCell::new(Array1::zeros(shape.q)),
            sigma2_buf: RefCell::new(Array1::zeros(n)),
            deriv_buf: RefCell::new(Array2::zeros((n, shape.n_mean_variance()))),
        }
    }

    /// Resizes the per-observation buffers when the sample length changes.
    pub fn ensure_len(&self, n: usize) {
        let mut sigma2 = self.sigma2_buf.borrow_mut();
        if sigma2.len() != n {
            *sigma2 = Array1::zeros(n);
        }
        let mut deriv = self.deriv_buf.borrow_mut();
        if deriv.nrows() != n {
            *deriv = Array2::zeros((n, deriv.ncols()));
        }
    }
}

/// GarchParams
///
/// Purpose
/// -------
/// Model-space parameters of a GARCH(p, q) with mean:
/// `r_t = μ + ε_t`, `σ²_t = ω + Σ α_i ε²_{t−i} + Σ β_j σ²_{t−j}`.
///
/// Invariants
/// ----------
/// - Values built through [`GarchParams::new`] or [`GarchParams::from_theta`]
///   satisfy every bound below. Direct field edits bypass these checks; call
///   [`GarchParams::validate_for`] afterwards if needed.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchParams {
    /// Constant mean of the returns, in percent.
    pub mu: f64,
    /// Variance intercept, strictly positive.
    pub omega: f64,
    /// ARCH coefficients `α_1..α_p`, each non-negative.
    pub alpha: Array1<f64>,
    /// GARCH coefficients `β_1..β_q`, each non-negative.
    pub beta: Array1<f64>,
    /// Degrees of freedom (> 2) for the Student-t families, else `None`.
    pub nu: Option<f64>,
    /// Skewness in `(−1, 1)` for the skewed Student-t, else `None`.
    pub lambda: Option<f64>,
}

impl GarchParams {
    /// Validated constructor in model space.
    ///
    /// # Errors
    /// - `InvalidMu`, `InvalidOmega`, `InvalidAlpha`, `InvalidBeta` for
    ///   non-finite or out-of-sign values.
    /// - `StationarityViolated` when `Σα + Σβ ≥ 1`.
    /// - `InvalidNu` / `InvalidLambda` for inadmissible shape parameters.
    pub fn new(
        mu: f64, omega: f64, alpha: Array1<f64>, beta: Array1<f64>, nu: Option<f64>,
        lambda: Option<f64>,
    ) -> ParamResult<Self> {
        validate_mu(mu)?;
        validate_omega(omega)?;
        validate_alpha(alpha.view(), alpha.len())?;
        validate_beta(beta.view(), beta.len())?;
        validate_stationarity(alpha.view(), beta.view())?;
        if let Some(value) = nu.filter(|v| !(v.is_finite() && *v > 2.0)) {
            return Err(ParamError::InvalidNu { value });
        }
        if let Some(value) = lambda.filter(|v| !(v.is_finite() && v.abs() < 1.0)) {
            return Err(ParamError::InvalidLambda { value });
        }
        Ok(GarchParams { mu, omega, alpha, beta, nu, lambda })
    }

    /// Forward θ-map. Every finite θ of the right length maps to admissible
    /// parameters.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` when `θ` does not match `shape` and `innovation`.
    /// - `InvalidThetaInput` for a non-finite entry.
    pub fn from_theta(
        theta: ArrayView1<f64>, shape: &GarchShape, innovation: Innovation,
    ) -> ParamResult<Self> {
        let mut alpha = Array1::zeros(shape.p);
        let mut beta = Array1::zeros(shape.q);
        let (mu, omega, nu, lambda) = {
            let mut ws = WorkSpace::new(alpha.view_mut(), beta.view_mut(), shape, innovation)?;
            ws.update(theta)?;
            (ws.mu, ws.omega, ws.nu, ws.lambda)
        };
        Ok(GarchParams { mu, omega, alpha, beta, nu, lambda })
    }

    /// Checks that these parameters fit a GARCH(p, q) with the given family.
    pub fn validate_for(&self, shape: &GarchShape, innovation: Innovation) -> ParamResult<()> {
        validate_alpha(self.alpha.view(), shape.p)?;
        validate_beta(self.beta.view(), shape.q)?;
        innovation.validate_shape(self.nu, self.lambda)
    }

    /// Inverse θ-map.
    pub fn to_theta(&self, innovation: Innovation) -> ParamResult<Array1<f64>> {
        let shape = self.shape();
        self.validate_for(&shape, innovation)?;
        let (p, q) = (shape.p, shape.q);
        let mut theta = Array1::<f64>::zeros(theta_len(&shape, innovation));

        theta[0] = self.mu;
        theta[1] = safe_softplus_inv((self.omega - OMEGA_FLOOR).max(LOGIT_EPS));

        let mass = 1.0 - STATIONARITY_MARGIN;
        let log_slack = (mass - self.persistence()).max(LOGIT_EPS).ln();
        for (t, &a) in theta.slice_mut(s![2..2 + p]).iter_mut().zip(self.alpha.iter()) {
            *t = a.max(LOGIT_EPS).ln() - log_slack;
        }
        for (t, &b) in theta.slice_mut(s![2 + p..2 + p + q]).iter_mut().zip(self.beta.iter()) {
            *t = b.max(LOGIT_EPS).ln() - log_slack;
        }

        let shape_idx = 2 + p + q;
        if let Some(nu) = self.nu {
            theta[shape_idx] = safe_softplus_inv((nu - NU_MIN).max(LOGIT_EPS));
        }
        if let Some(lambda) = self.lambda {
            let bound = 1.0 - LOGIT_EPS;
            theta[shape_idx + 1] = (lambda / LAMBDA_BOUND).clamp(-bound, bound).atanh();
        }
        Ok(theta)
    }

    /// `∂(μ, ω, α, β, ν?, λ?)/∂θ` evaluated at these parameters.
    ///
    /// Uses `softplus′(x) = 1 − exp(−softplus(x))`, with `softplus(θ_ω) =
    /// ω − OMEGA_FLOOR`, so that the Jacobian can be formed from model-space
    /// values alone.
    pub fn theta_jacobian(&self) -> Array2<f64> {
        let (p, q) = (self.alpha.len(), self.beta.len());
        let k = p + q;
        let dim = 2 + k + self.nu.is_some() as usize + self.lambda.is_some() as usize;
        let mut jac = Array2::<f64>::zeros((dim, dim));

        jac[[0, 0]] = 1.0;
        jac[[1, 1]] = -(-(self.omega - OMEGA_FLOOR)).exp_m1();

        let mass = 1.0 - STATIONARITY_MARGIN;
        let pi = |i: usize| if i < p { self.alpha[i] } else { self.beta[i - p] };
        for r in 0..k {
            for c in 0..k {
                let delta = if r == c { 1.0 } else { 0.0 };
                jac[[2 + r, 2 + c]] = pi(r) * (delta - pi(c) / mass);
            }
        }

        let mut idx = 2 + k;
        if let Some(nu) = self.nu {
            jac[[idx, idx]] = -(-(nu - NU_MIN)).exp_m1();
            idx += 1;
        }
        if let Some(lambda) = self.lambda {
            let ratio = lambda / LAMBDA_BOUND;
            jac[[idx, idx]] = LAMBDA_BOUND * (1.0 - ratio * ratio);
        }
        jac
    }

    /// `Σα + Σβ`.
    pub fn persistence(&self) -> f64 {
        self.alpha.sum() + self.beta.sum()
    }

    /// `ω / (1 − Σα − Σβ)`.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.persistence())
    }

    pub fn shape(&self) -> GarchShape {
        GarchShape { p: self.alpha.len(), q: self.beta.len() }
    }

    /// Model-space vector in θ ordering.
    pub fn to_vec(&self) -> Array1<f64> {
        let mut out = Vec::with_capacity(2 + self.alpha.len() + self.beta.len() + 2);
        out.push(self.mu);
        out.push(self.omega);
        out.extend(self.alpha.iter().copied());
        out.extend(self.beta.iter().copied());
        out.extend(self.nu);
        out.extend(self.lambda);
        Array1::from(out)
    }

    /// Display names in θ ordering, e.g. `alpha[1]`.
    pub fn names(&self) -> Vec<String> {
        let mut out = vec!["mu".to_string(), "omega".to_string()];
        out.extend((1..=self.alpha.len()).map(|i| format!("alpha[{i}]")));
        out.extend((1..=self.beta.len()).map(|j| format!("beta[{j}]")));
        if self.nu.is_some() {
            out.push("nu".to_string());
        }
        if self.lambda.is_some() {
            out.push("lambda".to_string());
        }
        out
    }
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
    // - Validation in `GarchParams::new`, including the stationarity failure.
    // - θ round-trips for interior points.
    // - The analytic θ-Jacobian against central differences.
    // - Derived quantities and naming.
    // -------------------------------------------------------------------------

    fn skew_params() -> GarchParams {
        GarchParams::new(0.04, 0.02, array![0.07, 0.03], array![0.85], Some(6.5), Some(-0.2))
            .expect("interior parameters")
    }

    #[test]
    // Purpose
    // -------
    // Ensure the model-space constructor enforces every constraint.
    //
    // Given
    // -----
    // - ω = 0, α = [−0.1], α + β = 1.05, ν = 1.9 and λ = 1.
    //
    // Expect
    // ------
    // - `InvalidOmega`, `InvalidAlpha`, `StationarityViolated`, `InvalidNu`,
    //   `InvalidLambda` respectively.
    fn new_enforces_constraints() {
        // Act & Assert
        assert!(matches!(
            GarchParams::new(0.0, 0.0, array![0.1], array![0.8], None, None),
            Err(ParamError::InvalidOmega { .. })
        ));
        assert!(matches!(
            GarchParams::new(0.0, 0.1, array![-0.1], array![0.8], None, None),
            Err(ParamError::InvalidAlpha { index: 0, .. })
        ));
        assert!(matches!(
            GarchParams::new(0.0, 0.1, array![0.15], array![0.9], None, None),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            GarchParams::new(0.0, 0.1, array![0.1], array![0.8], Some(1.9), None),
            Err(ParamError::InvalidNu { .. })
        ));
        assert!(matches!(
            GarchParams::new(0.0, 0.1, array![0.1], array![0.8], Some(5.0), Some(1.0)),
            Err(ParamError::InvalidLambda { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the θ-map inverts on an interior point.
    //
    // Given
    // -----
    // - Skew-t GARCH(2, 1) parameters well inside the admissible region.
    //
    // Expect
    // ------
    // - `from_theta(to_theta(params))` recovers every component to 1e-10.
    fn theta_round_trip_recovers_interior_params() {
        // Arrange
        let params = skew_params();
        let shape = params.shape();

        // Act
        let theta = params.to_theta(Innovation::SkewStudentT).expect("skew-t params");
        let back =
            GarchParams::from_theta(theta.view(), &shape, Innovation::SkewStudentT).expect("valid");

        // Assert
        for (a, b) in back.to_vec().iter().zip(params.to_vec().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // Validate the θ-Jacobian against central differences of the θ-map.
    //
    // Given
    // -----
    // - The skew-t GARCH(2, 1) parameters and their θ.
    //
    // Expect
    // ------
    // - Every Jacobian column matches `(f(θ + h e_j) − f(θ − h e_j)) / 2h`.
    fn theta_jacobian_matches_central_differences() {
        // Arrange
        let params = skew_params();
        let shape = params.shape();
        let theta = params.to_theta(Innovation::SkewStudentT).expect("skew-t params");
        let map = |t: &Array1<f64>| {
            GarchParams::from_theta(t.view(), &shape, Innovation::SkewStudentT)
                .expect("admissible")
                .to_vec()
        };
        let h = 1e-6;

        // Act
        let jac = params.theta_jacobian();

        // Assert
        for j in 0..theta.len() {
            let mut up = theta.clone();
            let mut dn = theta.clone();
            up[j] += h;
            dn[j] -= h;
            let col = (map(&up) - map(&dn)) / (2.0 * h);
            for i in 0..theta.len() {
                assert_relative_eq!(jac[[i, j]], col[i], epsilon = 1e-7);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check derived quantities and parameter names.
    //
    // Given
    // -----
    // - The skew-t GARCH(2, 1) parameters.
    //
    // Expect
    // ------
    // - Persistence 0.95, unconditional variance 0.4, names in θ order.
    // - `to_theta` for the Normal family reports a shape mismatch.
    fn derived_quantities_and_names() {
        // Arrange
        let params = skew_params();

        // Act & Assert
        assert_relative_eq!(params.persistence(), 0.95, epsilon = 1e-14);
        assert_relative_eq!(params.uncond_variance(), 0.4, epsilon = 1e-12);
        assert_eq!(
            params.names(),
            vec!["mu", "omega", "alpha[1]", "alpha[2]", "beta[1]", "nu", "lambda"]
        );
        assert!(matches!(
            params.to_theta(Innovation::Normal),
            Err(ParamError::ShapeParameterMismatch { expected: 0, actual: 2 })
        ));
    }
}
