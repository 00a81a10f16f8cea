//! Validation helpers for GARCH parameters, θ-vectors and return samples.
//!
//! Each helper checks one constraint and reports the first violation as a
//! typed error. Parameter checks return [`ParamError`] so they can be used
//! from inside the optimizer; sample checks return [`GarchError`].
//!
//! Conventions
//! -----------
//! - `p` counts α (ARCH) coefficients and `q` counts β (GARCH) coefficients.
//! - θ layout is `(μ, θ_ω, θ_α[0..p), θ_β[0..q), θ_shape…)`.
use crate::volatility::{
    core::{innovations::Innovation, shape::GarchShape},
    errors::{GarchError, GarchResult, ParamError, ParamResult},
};
use ndarray::ArrayView1;

pub fn validate_mu(mu: f64) -> ParamResult<()> {
    if !mu.is_finite() {
        return Err(ParamError::InvalidMu { value: mu });
    }
    Ok(())
}

pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if !omega.is_finite() || omega <= 0.0 {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

pub fn validate_alpha(alpha: ArrayView1<f64>, p: usize) -> ParamResult<()> {
    if alpha.len() != p {
        return Err(ParamError::AlphaLengthMismatch { expected: p, actual: alpha.len() });
    }
    if let Some((index, &value)) =
        alpha.iter().enumerate().find(|(_, a)| !a.is_finite() || **a < 0.0)
    {
        return Err(ParamError::InvalidAlpha { index, value });
    }
    Ok(())
}

pub fn validate_beta(beta: ArrayView1<f64>, q: usize) -> ParamResult<()> {
    if beta.len() != q {
        return Err(ParamError::BetaLengthMismatch { expected: q, actual: beta.len() });
    }
    if let Some((index, &value)) =
        beta.iter().enumerate().find(|(_, b)| !b.is_finite() || **b < 0.0)
    {
        return Err(ParamError::InvalidBeta { index, value });
    }
    Ok(())
}

/// `Σα + Σβ < 1`.
pub fn validate_stationarity(alpha: ArrayView1<f64>, beta: ArrayView1<f64>) -> ParamResult<()> {
    let coeff_sum = alpha.sum() + beta.sum();
    if !coeff_sum.is_finite() || coeff_sum >= 1.0 {
        return Err(ParamError::StationarityViolated { coeff_sum });
    }
    Ok(())
}

pub fn validate_slack(slack: f64) -> ParamResult<()> {
    if !slack.is_finite() || slack < 0.0 {
        return Err(ParamError::InvalidSlack { value: slack });
    }
    Ok(())
}

/// Length and finiteness of an unconstrained θ.
pub fn validate_theta(
    theta: ArrayView1<f64>, shape: &GarchShape, innovation: Innovation,
) -> ParamResult<()> {
    let expected = theta_len(shape, innovation);
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::InvalidThetaInput { index, value });
    }
    Ok(())
}

/// `2 + p + q + n_shape`.
pub fn theta_len(shape: &GarchShape, innovation: Innovation) -> usize {
    shape.n_mean_variance() + innovation.n_shape()
}

/// Every return must be finite and there must be at least `required`.
pub fn validate_returns(returns: ArrayView1<f64>, required: usize) -> GarchResult<()> {
    if returns.len() < required {
        return Err(GarchError::InsufficientData { len: returns.len(), required });
    }
    if let Some((index, &value)) = returns.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        return Err(GarchError::NonFiniteData { index, value });
    }
    Ok(())
}
