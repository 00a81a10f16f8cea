//! Estimation options for GARCH models.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::core::{guards::VarianceGuards, init::StartingValues},
};

/// Everything about a fit except the model itself. The default uses
/// heuristic starting values and computes standard errors.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    pub mle_opts: MLEOptions,
    pub start: StartingValues,
    /// Clamp applied to every `σ²_t` in the likelihood, the fitted path and
    /// forecasts.
    pub variance_guards: VarianceGuards,
    /// Compute observed-information standard errors after the fit.
    pub compute_std_errors: bool,
}

impl GarchOptions {
    pub fn new(
        mle_opts: MLEOptions, start: StartingValues, variance_guards: VarianceGuards,
        compute_std_errors: bool,
    ) -> GarchOptions {
        GarchOptions { mle_opts, start, variance_guards, compute_std_errors }
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        GarchOptions {
            mle_opts: MLEOptions::default(),
            start: StartingValues::Heuristic,
            variance_guards: VarianceGuards::default(),
            compute_std_errors: true,
        }
    }
}
