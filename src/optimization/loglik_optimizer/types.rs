//! Numeric aliases shared by the optimizer, the GARCH objective and the
//! inference layer, plus the concrete argmin solver types.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector seen by the optimizer.
pub type Theta = Array1<f64>;

/// Gradient with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Dense square matrix over [`Theta`] coordinates.
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// argmin function-evaluation counters keyed by counter name.
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
