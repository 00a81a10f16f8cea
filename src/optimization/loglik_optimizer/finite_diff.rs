//! Finite-difference derivatives used when analytic ones are missing or
//! unusable.
//!
//! Purpose
//! -------
//! - Provide numerical gradients of the optimizer cost for objectives that
//!   do not implement `LogLikelihood::grad`.
//! - Build Hessians from an analytic gradient for observed-information
//!   standard errors.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences when the central stencil produced a non-finite
//!   entry or the objective raised an error at one of the evaluation points.
//! - [`compute_hessian`] differentiates a gradient closure (central first,
//!   forward as fallback) and symmetrizes the result.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors raised by the objective during probing are captured in a
//!   `RefCell` side channel (the `finitediff` closures must return `f64`)
//!   and re-raised after the stencil completes.
//! - Returned gradients and Hessians are validated to be finite and of the
//!   expected shape.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Numerical gradient of a fallible scalar function.
pub fn fd_gradient<G>(theta: &Theta, func: G) -> OptResult<Grad>
where
    G: Fn(&Theta) -> Result<f64, Error>,
{
    let dim = theta.len();
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let eval = |x: &Theta| -> f64 {
        match func(x) {
            Ok(v) => v,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };

    let central = theta.central_diff(&eval);
    if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, &eval, &closure_err)
}

/// Forward-difference gradient; clears and then re-checks the error slot.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Jacobian of `grad` at `theta`, symmetrized.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(grad: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(grad);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(grad);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_relative_eq;
    use argmin::core::ArgminError;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Central and forward numerical gradients on smooth objectives.
    // - Error propagation from the objective through the side channel.
    // - Hessian construction and symmetrization from a gradient closure.
    //
    // They intentionally DO NOT cover:
    // - Step-size selection inside `finitediff`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check `fd_gradient` against the analytic gradient of a smooth function.
    //
    // Given
    // -----
    // - `f(x, y) = x² + 3xy + ln(1 + y²)` at (0.5, −1.2).
    //
    // Expect
    // ------
    // - The numerical gradient matches `(2x + 3y, 3x + 2y/(1+y²))`.
    fn fd_gradient_matches_analytic_gradient() {
        // Arrange
        let theta: Theta = array![0.5_f64, -1.2];
        let f = |t: &Theta| Ok(t[0] * t[0] + 3.0 * t[0] * t[1] + (1.0 + t[1] * t[1]).ln());

        // Act
        let g = fd_gradient(&theta, f).expect("smooth objective should differentiate");

        // Assert
        let (x, y) = (theta[0], theta[1]);
        assert_relative_eq!(g[0], 2.0 * x + 3.0 * y, epsilon = 1e-6);
        assert_relative_eq!(g[1], 3.0 * x + 2.0 * y / (1.0 + y * y), epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an objective error raised during probing is returned.
    //
    // Given
    // -----
    // - An objective that always fails with `ArgminError::NotImplemented`.
    //
    // Expect
    // ------
    // - `fd_gradient` returns `OptError::NotImplemented`.
    fn fd_gradient_propagates_objective_error() {
        // Arrange
        let theta: Theta = array![1.0_f64];
        let f = |_: &Theta| -> Result<f64, Error> {
            Err(ArgminError::NotImplemented { text: "no gradient".into() }.into())
        };

        // Act
        let err = fd_gradient(&theta, f).expect_err("failing objective must error");

        // Assert
        assert_eq!(err, OptError::NotImplemented { text: "no gradient".into() });
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a NaN-valued objective yields `InvalidGradient`.
    //
    // Given
    // -----
    // - `f ≡ NaN` and an empty error slot.
    //
    // Expect
    // ------
    // - `run_fd_diff` fails with `InvalidGradient`.
    fn run_fd_diff_nan_objective_is_invalid_gradient() {
        // Arrange
        let theta: Theta = array![0.0_f64, 1.0];
        let slot: RefCell<Option<Error>> = RefCell::new(None);

        // Act
        let err = run_fd_diff(&theta, &|_: &Theta| f64::NAN, &slot).expect_err("NaN gradient");

        // Assert
        assert!(matches!(err, OptError::InvalidGradient { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify `compute_hessian` on a quadratic form with a known Hessian.
    //
    // Given
    // -----
    // - `∇f(θ) = Aθ` with symmetric `A = [[4, 1], [1, 3]]`.
    //
    // Expect
    // ------
    // - The Hessian equals `A` and is exactly symmetric.
    fn compute_hessian_recovers_quadratic_form() {
        // Arrange
        let a = array![[4.0_f64, 1.0], [1.0, 3.0]];
        let grad = |t: &Theta| -> Array1<f64> { a.dot(t) };
        let theta: Theta = array![0.3_f64, -0.7];

        // Act
        let h = compute_hessian(&grad, &theta).expect("linear gradient has a finite Hessian");

        // Assert
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(h[[i, j]], a[[i, j]], epsilon = 1e-6);
            }
        }
        assert_eq!(h[[0, 1]], h[[1, 0]]);
    }
}
