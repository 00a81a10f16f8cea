//! Entry points for maximizing a [`LogLikelihood`].
//!
//! [`maximize`] is the one-shot function; [`Optimizer`] is the seam the
//! fitter depends on, so the solver can be swapped without touching model
//! code. [`Lbfgs`] is the default implementation.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome},
        types::Theta,
    },
};

/// Maps `(objective, initial guess) → parameters`.
///
/// Constraints travel with the objective: either its parameterization makes
/// every θ admissible or its `check` rejects the guess. Implementations must
/// be deterministic for a fixed objective, data set and guess, and must
/// report `converged = false` when they stop for any reason other than a
/// satisfied tolerance.
pub trait Optimizer {
    fn optimize<F: LogLikelihood>(
        &self, objective: &F, initial_guess: Theta, data: &F::Data,
    ) -> OptResult<OptimOutcome>;
}

/// argmin L-BFGS with the line search selected in [`MLEOptions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lbfgs {
    pub opts: MLEOptions,
}

impl Lbfgs {
    pub fn new(opts: MLEOptions) -> Self {
        Self { opts }
    }
}

impl Optimizer for Lbfgs {
    fn optimize<F: LogLikelihood>(
        &self, objective: &F, initial_guess: Theta, data: &F::Data,
    ) -> OptResult<OptimOutcome> {
        maximize(objective, initial_guess, data, &self.opts)
    }
}

pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
