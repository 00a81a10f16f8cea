//! Exposes a [`LogLikelihood`] as an argmin minimization problem.
//!
//! The cost is `c(θ) = −ℓ(θ)`. Analytic gradients are negated; objectives
//! without one are differentiated numerically on the cost itself, so that
//! branch needs no sign flip.
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value }.into());
        }
        Ok(-value)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => Ok(fd_gradient(theta, |t| self.cost(t))?),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sign conventions of cost and gradient.
    // - The finite-difference fallback when no analytic gradient exists.
    // - Rejection of non-finite objective values.
    // -------------------------------------------------------------------------

    /// Concave quadratic `ℓ(θ) = −½‖θ − c‖²`, optionally with its gradient.
    struct Bowl {
        analytic: bool,
    }

    impl LogLikelihood for Bowl {
        type Data = Theta;

        fn value(&self, theta: &Theta, centre: &Theta) -> OptResult<Cost> {
            let d = theta - centre;
            Ok(-0.5 * d.dot(&d))
        }

        fn check(&self, _theta: &Theta, _data: &Theta) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, centre: &Theta) -> OptResult<Grad> {
            if self.analytic { Ok(centre - theta) } else { Err(OptError::GradientNotImplemented) }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that cost and gradient are the negated log-likelihood and its
    // negated gradient, whichever gradient path is used.
    //
    // Given
    // -----
    // - The bowl centred at (1, −2), evaluated at (0, 0).
    //
    // Expect
    // ------
    // - Cost = 2.5 and gradient = (−1, 2) for both analytic and numerical
    //   paths.
    fn adapter_negates_value_and_gradient() {
        // Arrange
        let centre = array![1.0_f64, -2.0];
        let theta = array![0.0_f64, 0.0];

        for analytic in [true, false] {
            let model = Bowl { analytic };
            let problem = ArgMinAdapter::new(&model, &centre);

            // Act
            let cost = problem.cost(&theta).expect("finite cost");
            let grad = problem.gradient(&theta).expect("finite gradient");

            // Assert
            assert_relative_eq!(cost, 2.5);
            assert_relative_eq!(grad[0], -1.0, epsilon = 1e-6);
            assert_relative_eq!(grad[1], 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite log-likelihood is reported rather than passed on.
    //
    // Given
    // -----
    // - A centre containing infinity.
    //
    // Expect
    // ------
    // - `cost` fails and the error maps back to `NonFiniteCost`.
    fn adapter_rejects_non_finite_value() {
        // Arrange
        let centre = array![f64::INFINITY];
        let model = Bowl { analytic: true };
        let problem = ArgMinAdapter::new(&model, &centre);

        // Act
        let err = problem.cost(&array![0.0]).expect_err("infinite value");

        // Assert
        assert!(matches!(OptError::from(err), OptError::NonFiniteCost { .. }));
    }
}
