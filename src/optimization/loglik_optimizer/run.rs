//! Runs a configured argmin solver on an adapted objective and converts the
//! final state into an [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        traits::{LogLikelihood, MLEOptions, OptimOutcome},
        types::{Grad, Theta},
    },
};
use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin_math::ArgminL2Norm;
use tracing::debug;

pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut executor = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = executor.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )?;
    debug!(
        iterations = outcome.iterations,
        loglik = outcome.value,
        converged = outcome.converged,
        status = %outcome.status,
        "l-bfgs finished"
    );
    Ok(outcome)
}

// ---- Helper Methods ----

fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let grad_norm = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    debug!(loglik = ll0, grad_norm = ?grad_norm, dim = theta0.len(), "l-bfgs initial state");
    Ok(())
}
