//! Public surface of the likelihood optimizer.
//!
//! - [`LogLikelihood`]: what an objective must provide.
//! - [`MLEOptions`] and [`Tolerances`]: stopping rules and solver settings.
//! - [`LineSearcher`]: line search used inside L-BFGS.
//! - [`OptimOutcome`]: normalized result, including whether a tolerance was
//!   actually met.
//!
//! Convention: the optimizer *maximizes* `ℓ(θ)` by minimizing `c(θ) = −ℓ(θ)`.
//! `LogLikelihood::grad`, when implemented, returns `∇ℓ(θ)`; the adapter
//! flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// An objective to be maximized over an unconstrained θ.
///
/// Constraints on the underlying model parameters are the implementor's
/// responsibility: either through a reparameterization that makes every θ
/// admissible, or by rejecting θ in [`LogLikelihood::check`].
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;

    /// Validates an initial guess before the solver starts.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    /// Analytic `∇ℓ(θ)`. The default defers to finite differences.
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS. Parsed case-insensitively, ignoring `-`
/// and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are 'MoreThuente' or 'HagerZhang' (case insensitive).",
            }),
        }
    }
}

/// Solver configuration shared by every fit.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    /// Logs the initial state and, with the `obs_slog` feature, every iteration.
    pub verbose: bool,
    /// L-BFGS history length; `None` uses `DEFAULT_LBFGS_MEM`.
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// # Errors
    /// `InvalidLBFGSMem` when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(0) = lbfgs_mem {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. At least one must be set.
///
/// `tol_grad` bounds the gradient norm and `tol_cost` the absolute change in
/// cost between iterations. `max_iter` caps the run; hitting it is *not*
/// convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// # Errors
    /// - `NoTolerancesProvided` when all three are `None`.
    /// - `InvalidTolGrad`, `InvalidTolCost` for non-positive or non-finite
    ///   tolerances.
    /// - `InvalidMaxIter` for `Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if let Some(0) = max_iter {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: Some(1e-12), max_iter: Some(500) }
    }
}

/// Result of one optimizer run, expressed in log-likelihood terms.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    /// `ℓ(θ̂)`, i.e. the negated best cost.
    pub value: f64,
    /// True only when the solver stopped because a tolerance was met.
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let status = match &termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            TerminationStatus::Terminated(reason) => format!("{reason:?}"),
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
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
    // - Parsing of line-search names.
    // - Validation in `Tolerances::new` and `MLEOptions::new`.
    // - Mapping of argmin termination reasons onto `OptimOutcome::converged`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing of line-search names.
    //
    // Given
    // -----
    // - "MoreThuente", "hager-zhang", and "bisection".
    //
    // Expect
    // ------
    // - The first two parse; the last fails with `InvalidLineSearch`.
    fn line_searcher_from_str_parses_known_names() {
        // Act & Assert
        assert_eq!("MoreThuente".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert_eq!("hager-zhang".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert!(matches!(
            "bisection".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Validate the constructor guards of `Tolerances` and `MLEOptions`.
    //
    // Given
    // -----
    // - All-`None` tolerances, `max_iter = 0`, and `lbfgs_mem = 0`.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidMaxIter`, and `InvalidLBFGSMem`.
    fn constructors_reject_invalid_settings() {
        // Act & Assert
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(1e-6), None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
        assert!(matches!(
            MLEOptions::new(Tolerances::default(), LineSearcher::MoreThuente, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Distinguish a tolerance-based stop from an iteration-cap stop.
    //
    // Given
    // -----
    // - The same estimate wrapped with `SolverConverged` and with
    //   `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged` is true for the former and false for the latter; the
    //   status string names the reason.
    fn outcome_converged_flag_follows_termination_reason() {
        // Arrange
        let theta = array![0.1_f64, 0.2];
        let done = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let capped = TerminationStatus::Terminated(TerminationReason::MaxItersReached);

        // Act
        let ok = OptimOutcome::new(Some(theta.clone()), -1.5, done, 12, FnEvalMap::new(), None)
            .expect("valid outcome");
        let cap = OptimOutcome::new(Some(theta), -1.5, capped, 500, FnEvalMap::new(), None)
            .expect("valid outcome");

        // Assert
        assert!(ok.converged);
        assert!(!cap.converged);
        assert!(cap.status.contains("MaxIters"));
        assert_eq!(cap.iterations, 500);
    }
}
