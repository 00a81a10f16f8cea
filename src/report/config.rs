//! Report configuration.
//!
//! [`ReportConfig`] is the single configuration surface of a run: which
//! ticker and date range to load, the model order and innovation family,
//! the diagnostic lags, the missing-price policy and output scaling. It is
//! `serde` (de)serializable and validated before the pipeline starts.
use crate::{
    optimization::loglik_optimizer::{MLEOptions, Tolerances},
    report::errors::{ReportError, ReportResult},
    returns::MissingPricePolicy,
    statistical_tests::DEFAULT_LAGS,
    volatility::{GarchOptions, GarchShape, Innovation, ModelSpec},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trading days per year.
pub const DEFAULT_ANNUALIZATION: f64 = 252.0;

/// Days of variance forecast in a report.
pub const DEFAULT_FORECAST_HORIZON: usize = 10;

/// Settings for one report run. Every field has a default, so a partial
/// config file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub ticker: String,
    /// First date loaded, inclusive. Must precede `end`.
    pub start: NaiveDate,
    /// Last date loaded, inclusive.
    pub end: NaiveDate,
    /// ARCH order (number of α terms).
    pub p: usize,
    /// GARCH order (number of β terms).
    pub q: usize,
    pub innovation: Innovation,
    /// Ljung–Box lags, each at least 1.
    pub lags: Vec<usize>,
    pub missing_prices: MissingPricePolicy,
    /// Periods per year; volatility is scaled by its square root.
    pub annualization: f64,
    pub forecast_horizon: usize,
    /// Overrides the optimizer's iteration cap.
    pub max_iter: Option<usize>,
    /// Log optimizer progress.
    pub verbose: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            ticker: "AAPL".to_string(),
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            p: 1,
            q: 1,
            innovation: Innovation::SkewStudentT,
            lags: DEFAULT_LAGS.to_vec(),
            missing_prices: MissingPricePolicy::Reject,
            annualization: DEFAULT_ANNUALIZATION,
            forecast_horizon: DEFAULT_FORECAST_HORIZON,
            max_iter: None,
            verbose: false,
        }
    }
}

impl ReportConfig {
    /// Checks fields that do not depend on the data.
    pub fn validate(&self) -> ReportResult<()> {
        if self.ticker.trim().is_empty() {
            return Err(invalid("ticker", "must not be empty".to_string()));
        }
        if self.start >= self.end {
            return Err(invalid("start", format!("{} is not before {}", self.start, self.end)));
        }
        if self.lags.is_empty() || self.lags.contains(&0) {
            return Err(invalid("lags", format!("{:?}: need at least one lag >= 1", self.lags)));
        }
        if !(self.annualization.is_finite() && self.annualization > 0.0) {
            let reason = format!("{} must be finite and > 0", self.annualization);
            return Err(invalid("annualization", reason));
        }
        if self.forecast_horizon == 0 {
            return Err(invalid("forecast_horizon", "must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Builds the model specification, applying the iteration override.
    pub fn model_spec(&self) -> ReportResult<ModelSpec> {
        let shape = GarchShape::new(self.p, self.q)?;
        let mut options = GarchOptions::default();
        if let Some(max_iter) = self.max_iter {
            let defaults = Tolerances::default();
            let tols = Tolerances::new(defaults.tol_grad, defaults.tol_cost, Some(max_iter))?;
            options.mle_opts = MLEOptions { tols, ..options.mle_opts };
        }
        options.mle_opts.verbose = self.verbose;
        Ok(ModelSpec::new(shape, self.innovation, options))
    }
}

fn invalid(field: &'static str, reason: String) -> ReportError {
    ReportError::InvalidConfig { field, reason }
}
