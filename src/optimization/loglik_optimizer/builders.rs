//! L-BFGS construction for the two supported line searches.
//!
//! Builders apply the solver-level settings from [`MLEOptions`] (memory,
//! gradient and cost tolerances). The initial θ and the iteration cap are
//! executor concerns and are set in `run_lbfgs`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
