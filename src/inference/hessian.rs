//! inference::hessian — covariance of an M-estimator from observed
//! information.
//!
//! Purpose
//! -------
//! Turn the gradient of an **average** log-likelihood into a parameter
//! covariance matrix: differentiate the gradient numerically to obtain the
//! observed information `J(θ̂)`, invert it with an eigenvalue-truncated
//! pseudo-inverse, and rescale by the sample size.
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`] returns `Cov(θ̂) = J(θ̂)⁺ / n`.
//! - [`standard_errors`] extracts `√diag(Cov)`.
//! - The copy into `nalgebra` and the eigen-decomposition stay private.
//!
//! Invariants & assumptions
//! ------------------------
//! - `grad` is the gradient of the *negative* average log-likelihood, so
//!   that `J` is positive semi-definite near a maximum.
//! - Eigenvalues at or below [`EIGEN_EPS`] are treated as zero; the
//!   matching directions are excluded and a warning is emitted.
//!
//! Conventions
//! -----------
//! - No explicit inverse is formed.
//! - Errors are reported via [`InferenceResult`].
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        loglik_optimizer::finite_diff::compute_hessian,
        numerical_stability::transformations::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use tracing::warn;

/// `J(θ̂)⁺ / n_obs` with `J` the Jacobian of `grad` at `theta_hat`.
///
/// # Errors
/// - [`InferenceError::InvalidSampleSize`] for `n_obs == 0`.
/// - [`InferenceError::Hessian`] when the finite-difference Hessian fails.
/// - [`InferenceError::SingularInformation`] when no curvature survives
///   truncation.
/// - [`InferenceError::NonFiniteCovariance`] on any NaN/∞ entry.
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    grad: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> InferenceResult<Array2<f64>> {
    if n_obs == 0 {
        return Err(InferenceError::InvalidSampleSize { n_obs });
    }
    let dim = theta_hat.len();
    let obs_info = compute_hessian(grad, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(dim, dim);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);

    let mut cov = pseudo_inverse(obs_info_nalg, dim)?;
    cov.mapv_inplace(|v| v / n_obs as f64);
    if let Some(((row, col), &value)) = cov.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteCovariance { row, col, value });
    }
    Ok(cov)
}

/// `√max(diag(cov), 0)`.
pub fn standard_errors(cov: &Array2<f64>) -> Array1<f64> {
    cov.diag().mapv(|v| v.max(0.0).sqrt())
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// `Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k`.
fn pseudo_inverse(obs_info_nalg: DMatrix<f64>, dim: usize) -> InferenceResult<Array2<f64>> {
    let eigen = obs_info_nalg.symmetric_eigen();
    let q = eigen.eigenvectors;
    let kept: Vec<(usize, f64)> =
        eigen.eigenvalues.iter().copied().enumerate().filter(|(_, l)| *l > EIGEN_EPS).collect();
    if kept.is_empty() {
        return Err(InferenceError::SingularInformation { dim });
    }
    if kept.len() < dim {
        warn!(rank = kept.len(), dim, "observed information is rank deficient; truncating");
    }

    let mut out = Array2::<f64>::zeros((dim, dim));
    for &(k, lambda) in &kept {
        for i in 0..dim {
            let qi = q[(i, k)] / lambda;
            for j in 0..dim {
                out[[i, j]] += qi * q[(j, k)];
            }
        }
    }
    Ok(out)
}
