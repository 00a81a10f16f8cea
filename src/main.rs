//! garch-report — fit a GARCH model to a ticker's daily returns and print
//! the volatility report.
//!
//! Usage:
//!   garch-report --ticker AAPL --data-dir ./data
//!   garch-report --ticker SPY --p 1 --q 1 --dist student-t --json spy.json
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use garch_volatility::{
    report::{CsvPriceSource, ReportConfig, ReportSummary, run_report},
    returns::MissingPricePolicy,
    volatility::Innovation,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "garch-report")]
#[command(about = "Conditional volatility (GARCH) report with residual diagnostics")]
#[command(version)]
struct Cli {
    /// Ticker symbol; prices are read from <data-dir>/<TICKER>.csv
    #[arg(long, default_value = "AAPL")]
    ticker: String,

    /// First date (YYYY-MM-DD)
    #[arg(long, default_value = "2018-01-01")]
    start: NaiveDate,

    /// Last date (YYYY-MM-DD)
    #[arg(long, default_value = "2024-01-01")]
    end: NaiveDate,

    /// Directory holding `date,adj_close` CSV files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// ARCH order (number of alpha terms)
    #[arg(long, default_value_t = 1)]
    p: usize,

    /// GARCH order (number of beta terms)
    #[arg(long, default_value_t = 1)]
    q: usize,

    /// Innovation distribution: normal | student-t | skew-t
    #[arg(long, default_value = "skew-t")]
    dist: Innovation,

    /// Ljung-Box lags, comma separated
    #[arg(long, value_delimiter = ',', default_value = "10,20")]
    lags: Vec<usize>,

    /// Missing price handling: reject | forward-fill
    #[arg(long, default_value = "reject")]
    missing: MissingPricePolicy,

    /// Periods per year used to annualize volatility
    #[arg(long, default_value_t = 252.0)]
    annualization: f64,

    /// Variance forecast horizon
    #[arg(long, default_value_t = 10)]
    horizon: usize,

    /// Optimizer iteration cap
    #[arg(long)]
    max_iter: Option<usize>,

    /// Write a JSON summary to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging and per-iteration optimizer output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> (ReportConfig, PathBuf, Option<PathBuf>) {
        let config = ReportConfig {
            ticker: self.ticker,
            start: self.start,
            end: self.end,
            p: self.p,
            q: self.q,
            innovation: self.dist,
            lags: self.lags,
            missing_prices: self.missing,
            annualization: self.annualization,
            forecast_horizon: self.horizon,
            max_iter: self.max_iter,
            verbose: self.verbose,
        };
        (config, self.data_dir, self.json)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let (config, data_dir, json) = cli.into_config();
    let source = CsvPriceSource::new(data_dir);
    let report = run_report(&config, &source)
        .with_context(|| format!("volatility report for {} failed", config.ticker))?;

    println!("{report}");

    if let Some(path) = json {
        ReportSummary::from_report(&report)
            .write_json(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "JSON summary written");
    }
    Ok(())
}
