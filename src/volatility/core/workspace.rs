//! Zero-copy mapping from an unconstrained θ to GARCH model parameters.
//!
//! Purpose
//! -------
//! Let the likelihood evaluate candidate θ-vectors without allocating: the
//! α/β vectors are written into borrowed buffers owned by the model's
//! scratch space, and the scalar parameters are stored inline.
//!
//! Key behaviors
//! -------------
//! - [`WorkSpace::new`] checks buffer lengths against the model shape.
//! - [`WorkSpace::update`] applies the θ-map
//!   - `μ = θ₀`,
//!   - `ω = OMEGA_FLOOR + softplus(θ₁)`,
//!   - `(α, β, slack) = (1 − STATIONARITY_MARGIN)·softmax(θ_α, θ_β, 0)`,
//!   - `ν = NU_MIN + softplus(θ_ν)`, `λ = LAMBDA_BOUND·tanh(θ_λ)`,
//!
//!   and validates the result.
//!
//! Invariants & assumptions
//! ------------------------
//! - After a successful `update`, `Σα + Σβ < 1`, `ω ≥ OMEGA_FLOOR`, `ν > 2` and
//!   `|λ| < 1`, so every θ the optimizer proposes is admissible.
//! - Buffers are exclusively borrowed for the lifetime of the workspace.
use crate::{
    optimization::numerical_stability::transformations::{safe_softmax, safe_softplus},
    volatility::{
        core::{
            innovations::Innovation,
            params::{LAMBDA_BOUND, NU_MIN, OMEGA_FLOOR},
            shape::GarchShape,
            validation::{
                validate_alpha, validate_beta, validate_mu, validate_omega, validate_slack,
                validate_stationarity, validate_theta,
            },
        },
        errors::{ParamError, ParamResult},
    },
};
use ndarray::{ArrayView1, ArrayViewMut1, s};

/// Current model-space parameters, with `α`/`β` written into borrowed
/// buffers.
#[derive(Debug)]
pub struct WorkSpace<'a> {
    pub mu: f64,
    pub omega: f64,
    pub alpha: ArrayViewMut1<'a, f64>,
    pub beta: ArrayViewMut1<'a, f64>,
    /// `1 − STATIONARITY_MARGIN − Σα − Σβ`, strictly positive.
    pub slack: f64,
    pub nu: Option<f64>,
    pub lambda: Option<f64>,
    shape: GarchShape,
    innovation: Innovation,
}

impl<'a> WorkSpace<'a> {
    /// # Errors
    /// `AlphaLengthMismatch` / `BetaLengthMismatch` when a buffer does not
    /// match `shape`.
    pub fn new(
        alpha: ArrayViewMut1<'a, f64>, beta: ArrayViewMut1<'a, f64>, shape: &GarchShape,
        innovation: Innovation,
    ) -> ParamResult<Self> {
        if alpha.len() != shape.p {
            return Err(ParamError::AlphaLengthMismatch { expected: shape.p, actual: alpha.len() });
        }
        if beta.len() != shape.q {
            return Err(ParamError::BetaLengthMismatch { expected: shape.q, actual: beta.len() });
        }
        Ok(WorkSpace {
            mu: 0.0,
            omega: 0.0,
            alpha,
            beta,
            slack: 0.0,
            nu: None,
            lambda: None,
            shape: *shape,
            innovation,
        })
    }

    /// Apply the θ-map in place. On error the workspace may hold a partial
    /// update and must not be read.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch`, `InvalidThetaInput` for a malformed θ.
    /// - Any model-space validation failure, which only arises from
    ///   floating-point edge cases.
    pub fn update(&mut self, theta: ArrayView1<f64>) -> ParamResult<()> {
        let (p, q) = (self.shape.p, self.shape.q);
        validate_theta(theta, &self.shape, self.innovation)?;

        let mu = theta[0];
        validate_mu(mu)?;
        let omega = OMEGA_FLOOR + safe_softplus(theta[1]);
        validate_omega(omega)?;
        let slack = safe_softmax(
            self.alpha.view_mut(),
            self.beta.view_mut(),
            &theta.slice(s![2..2 + p + q]),
        );
        validate_alpha(self.alpha.view(), p)?;
        validate_beta(self.beta.view(), q)?;
        validate_stationarity(self.alpha.view(), self.beta.view())?;
        validate_slack(slack)?;

        let shape_idx = 2 + p + q;
        let (nu, lambda) = match self.innovation {
            Innovation::Normal => (None, None),
            Innovation::StudentT => (Some(NU_MIN + safe_softplus(theta[shape_idx])), None),
            Innovation::SkewStudentT => (
                Some(NU_MIN + safe_softplus(theta[shape_idx])),
                Some(LAMBDA_BOUND * theta[shape_idx + 1].tanh()),
            ),
        };
        if let Some(value) = nu.filter(|v| !(v.is_finite() && *v > 2.0)) {
            return Err(ParamError::InvalidNu { value });
        }

        self.mu = mu;
        self.omega = omega;
        self.slack = slack;
        self.nu = nu;
        self.lambda = lambda;
        Ok(())
    }

    pub fn persistence(&self) -> f64 {
        self.alpha.sum() + self.beta.sum()
    }

    pub fn shape(&self) -> &GarchShape {
        &self.shape
    }

    pub fn innovation(&self) -> Innovation {
        self.innovation
    }
}
