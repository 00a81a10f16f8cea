//! Pipeline driver: prices → returns → fit → residuals → diagnostics.
//!
//! Purpose
//! -------
//! Run the stages in order, each consuming only its predecessor's output,
//! and collect everything the presentation layer needs in a
//! [`VolatilityReport`].
//!
//! Key behaviors
//! -------------
//! - [`run_report`] fetches quotes from a [`PriceSource`] and applies the
//!   configured missing-price policy.
//! - [`run_report_on_prices`] starts from an already built [`PriceSeries`].
//! - Any stage failure aborts the run; there is no local recovery. The one
//!   degradation is unavailable standard errors, which the fitter logs.
//!
//! Conventions
//! -----------
//! - Each run is a fresh computation; nothing is cached between calls.
//! - Stage boundaries are logged at `info` inside a `report` span.
use crate::{
    inference::CoefficientRow,
    report::{config::ReportConfig, errors::ReportResult, source::PriceSource},
    returns::{PriceSeries, ReturnSeries},
    statistical_tests::{DescriptiveStats, DiagnosticReport},
    volatility::{FittedModel, Fitter, VarianceForecast},
};
use ndarray::Array1;
use tracing::{info, info_span};

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityReport {
    pub config: ReportConfig,
    pub returns: ReturnSeries,
    /// Describe table of the raw returns, computed before fitting.
    pub describe: DescriptiveStats,
    pub fitted: FittedModel,
    pub coefficients: Vec<CoefficientRow>,
    pub annualized_volatility: Array1<f64>,
    pub forecast: VarianceForecast,
    pub diagnostics: DiagnosticReport,
}

/// Run the full pipeline for `config.ticker` over `[config.start, config.end]`.
///
/// Parameters
/// ----------
/// - `config`: `&ReportConfig`
///   Ticker, date range, model and diagnostic settings.
/// - `source`: `&S`
///   Where quotes come from.
///
/// Returns
/// -------
/// `ReportResult<VolatilityReport>`
///   Every stage's output for one run.
///
/// Errors
/// ------
/// - `ReportError::InvalidConfig` for an invalid configuration, before any I/O.
/// - `ReportError::Source` when the source cannot be read.
/// - `ReportError::Returns` for missing quotes under `Reject`, bad prices or
///   fewer than two prices.
/// - Any error of [`run_report_on_prices`].
pub fn run_report<S: PriceSource>(
    config: &ReportConfig, source: &S,
) -> ReportResult<VolatilityReport> {
    config.validate()?;
    let _span = info_span!("report", ticker = %config.ticker).entered();
    let observations = source.fetch(&config.ticker, config.start, config.end)?;
    let prices = PriceSeries::from_observations(observations, config.missing_prices)?;
    info!(prices = prices.len(), "prices loaded");
    run_report_on_prices(config, &prices)
}

/// Run the pipeline from an in-memory [`PriceSeries`].
///
/// Only the model, lag, annualization and horizon settings of `config` are
/// used; the ticker, dates and missing-price policy are ignored.
///
/// # Errors
/// - `ReportError::InvalidConfig` for an invalid configuration.
/// - `ReportError::Returns` for non-positive or non-finite prices.
/// - `ReportError::Garch` for fitting failures, including non-convergence.
/// - `ReportError::Inference` when the coefficient table cannot be built.
/// - `ReportError::Diagnostics` when a lag is too large for the sample.
pub fn run_report_on_prices(
    config: &ReportConfig, prices: &PriceSeries,
) -> ReportResult<VolatilityReport> {
    config.validate()?;
    let spec = config.model_spec()?;
    let _span = info_span!("report_pipeline", model = %spec).entered();

    let returns = ReturnSeries::from_prices(prices)?;
    info!(returns = returns.len(), "returns built");
    let describe = DescriptiveStats::describe(&returns.values().to_vec())?;

    let fitted = Fitter::new(spec).fit_returns(&returns)?;
    let coefficients = fitted.coefficient_table()?;
    let annualized_volatility = fitted.annualized_volatility(config.annualization)?;
    let forecast = fitted.forecast_variance(config.forecast_horizon)?;

    let diagnostics =
        DiagnosticReport::from_standardized(fitted.standardized_residuals(), &config.lags)?;

    Ok(VolatilityReport {
        config: config.clone(),
        returns,
        describe,
        fitted,
        coefficients,
        annualized_volatility,
        forecast,
        diagnostics,
    })
}
