//! Text and JSON renderings of a [`VolatilityReport`].
//!
//! The text form (`Display`) is the human-readable console summary; the
//! [`ReportSummary`] is its machine-readable counterpart, written with
//! `serde_json`. Plotting is left to external tools.
use crate::{
    inference::CoefficientRow,
    report::{
        driver::VolatilityReport,
        errors::{ReportError, ReportResult},
    },
    statistical_tests::{DescriptiveStats, DiagnosticReport},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::{fmt, fs, path::Path};

/// Scalar fit statistics for the JSON summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    /// `ModelSpec` display, e.g. `"Constant mean - GARCH(1, 1) - skew-t innovations"`.
    pub model: String,
    pub n_obs: usize,
    /// Full-sample log-likelihood.
    pub loglik: f64,
    pub aic: f64,
    pub bic: f64,
    pub persistence: f64,
    pub unconditional_variance: f64,
    pub iterations: usize,
    pub status: String,
}

/// Machine-readable summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub first_return_date: Option<NaiveDate>,
    pub last_return_date: Option<NaiveDate>,
    pub describe: DescriptiveStats,
    pub fit: FitSummary,
    pub coefficients: Vec<CoefficientRow>,
    pub diagnostics: DiagnosticReport,
    /// `σ̂²_{T+1..T+h}`.
    pub variance_forecast: Vec<f64>,
    pub last_annualized_volatility: Option<f64>,
}

impl ReportSummary {
    /// Collect the summary fields from a finished run. Time series are not
    /// copied beyond the forecast and the last annualized volatility.
    pub fn from_report(report: &VolatilityReport) -> ReportSummary {
        let fitted = &report.fitted;
        let dates = report.returns.dates();
        ReportSummary {
            ticker: report.config.ticker.clone(),
            start: report.config.start,
            end: report.config.end,
            first_return_date: dates.first().copied(),
            last_return_date: dates.last().copied(),
            describe: report.describe,
            fit: FitSummary {
                model: fitted.spec().to_string(),
                n_obs: fitted.n_obs(),
                loglik: fitted.loglik(),
                aic: fitted.aic(),
                bic: fitted.bic(),
                persistence: fitted.persistence(),
                unconditional_variance: fitted.uncond_variance(),
                iterations: fitted.iterations(),
                status: fitted.status().to_string(),
            },
            coefficients: report.coefficients.clone(),
            diagnostics: report.diagnostics.clone(),
            variance_forecast: report.forecast.sigma2.to_vec(),
            last_annualized_volatility: report.annualized_volatility.last().copied(),
        }
    }

    /// # Errors
    /// `ReportError::Output` if serialization fails.
    pub fn to_json_pretty(&self) -> ReportResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| ReportError::Output {
            path: "<json>".to_string(),
            text: err.to_string(),
        })
    }

    pub fn write_json(&self, path: &Path) -> ReportResult<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|err| ReportError::Output {
            path: path.display().to_string(),
            text: err.to_string(),
        })
    }
}

impl fmt::Display for VolatilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fitted = &self.fitted;
        let d = &self.describe;
        writeln!(
            f,
            "{} daily log returns (%), {} to {}",
            self.config.ticker, self.config.start, self.config.end
        )?;
        writeln!(f)?;
        writeln!(f, "Descriptive statistics")?;
        writeln!(f, "  count     {:>12}", d.count)?;
        for (name, value) in [
            ("mean", d.mean),
            ("std", d.std),
            ("min", d.min),
            ("25%", d.q25),
            ("50%", d.median),
            ("75%", d.q75),
            ("max", d.max),
            ("skewness", d.skewness),
            ("kurtosis", d.kurtosis),
        ] {
            writeln!(f, "  {name:<9} {value:>12.4}")?;
        }
        writeln!(f)?;

        writeln!(f, "{}", fitted.spec())?;
        writeln!(
            f,
            "  n = {}  log-likelihood = {:.3}  AIC = {:.3}  BIC = {:.3}",
            fitted.n_obs(),
            fitted.loglik(),
            fitted.aic(),
            fitted.bic()
        )?;
        writeln!(f, "  {:<10} {:>10} {:>10} {:>8} {:>8}", "", "coef", "std err", "t", "P>|t|")?;
        for row in &self.coefficients {
            write!(f, "  {:<10} {:>10.4}", row.name, row.estimate)?;
            match (row.std_error, row.t_stat, row.p_value) {
                (Some(se), Some(t), Some(p)) => writeln!(f, " {se:>10.4} {t:>8.3} {p:>8.3}")?,
                _ => writeln!(f, " {:>10} {:>8} {:>8}", "n/a", "n/a", "n/a")?,
            }
        }
        writeln!(
            f,
            "  persistence = {:.4}  unconditional variance = {:.4}",
            fitted.persistence(),
            fitted.uncond_variance()
        )?;
        writeln!(f)?;

        writeln!(f, "Residual diagnostics")?;
        for (label, set) in [
            ("Ljung-Box z", &self.diagnostics.ljung_box_residuals),
            ("Ljung-Box z^2", &self.diagnostics.ljung_box_squared),
        ] {
            for o in set {
                writeln!(
                    f,
                    "  {label:<14} lag {:>3}: Q = {:>9.3}  p = {:.4}",
                    o.lag, o.stat, o.p_value
                )?;
            }
        }
        let jb = &self.diagnostics.jarque_bera;
        writeln!(f, "  Jarque-Bera            JB = {:>9.3}  p = {:.4}", jb.stat, jb.p_value)?;
        writeln!(f)?;

        if let Some(vol) = self.annualized_volatility.last() {
            writeln!(
                f,
                "Last annualized volatility (x sqrt({})): {vol:.2}%",
                self.config.annualization
            )?;
        }
        let forecast: Vec<String> =
            self.forecast.sigma2.iter().map(|s2| format!("{:.4}", s2)).collect();
        write!(f, "Variance forecast (h = 1..{}): {}", self.forecast.horizon, forecast.join(", "))
    }
}
