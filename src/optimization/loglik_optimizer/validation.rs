//! Guards for optimizer configuration and optimizer output.
//!
//! Every check returns an [`OptError`] naming the offending index or value;
//! nothing here panics.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::{Grad, Hessian, Theta},
};

pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwraps the optimizer's best parameter and checks it is finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance and rejection branches of the tolerance checks.
    // - Dimension and finiteness checks for gradients, estimates and Hessians.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Exercise every branch of the tolerance validators.
    //
    // Given
    // -----
    // - `None`, a positive tolerance, zero, and NaN.
    //
    // Expect
    // ------
    // - `None` and positive values pass; zero and NaN are rejected with the
    //   matching variant.
    fn tolerance_validators_accept_positive_and_reject_rest() {
        // Act & Assert
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(verify_tol_cost(Some(1e-12)).is_ok());
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check that a gradient with the wrong length or a NaN entry is flagged.
    //
    // Given
    // -----
    // - A length-2 gradient validated against dim 3, and a gradient with NaN
    //   at index 1.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_dimension_and_nan() {
        // Arrange
        let short = array![1.0_f64, 2.0];
        let bad = array![1.0_f64, f64::NAN];

        // Act & Assert
        assert_eq!(
            validate_grad(&short, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        );
        assert!(matches!(validate_grad(&bad, 2), Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a missing or non-finite estimate is surfaced.
    //
    // Given
    // -----
    // - `None`, a finite estimate, and an estimate containing infinity.
    //
    // Expect
    // ------
    // - `MissingThetaHat`, `Ok`, and `InvalidThetaHat` respectively.
    fn validate_theta_hat_branches() {
        // Act & Assert
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(validate_theta_hat(Some(array![0.1, -0.2])).is_ok());
        assert!(matches!(
            validate_theta_hat(Some(array![0.1, f64::INFINITY])),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify Hessian shape and entry checks.
    //
    // Given
    // -----
    // - A 2×3 matrix and a 2×2 matrix with NaN at (1, 0).
    //
    // Expect
    // ------
    // - `HessianDimMismatch` and `InvalidHessian { row: 1, col: 0, .. }`.
    fn validate_hessian_reports_shape_and_entry() {
        // Arrange
        let wide = Hessian::zeros((2, 3));
        let mut nan = Hessian::zeros((2, 2));
        nan[[1, 0]] = f64::NAN;

        // Act & Assert
        assert!(matches!(validate_hessian(&wide, 2), Err(OptError::HessianDimMismatch { .. })));
        assert!(matches!(
            validate_hessian(&nan, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
