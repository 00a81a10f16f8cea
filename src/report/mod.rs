//! report — configuration, price input and orchestration of a volatility
//! analysis run.
//!
//! Purpose
//! -------
//! Tie the pipeline stages together behind one call: load prices for a
//! ticker and date range, build returns, describe them, fit the GARCH
//! model, compute residual diagnostics and forecasts, and render the result
//! as text or JSON.
//!
//! Key behaviors
//! -------------
//! - [`ReportConfig`]: serde-backed configuration with defaults.
//! - [`PriceSource`] / [`CsvPriceSource`]: quote input keyed by
//!   `(ticker, start, end)`.
//! - [`run_report`] / [`run_report_on_prices`]: the driver.
//! - [`ReportSummary`]: JSON summary; `VolatilityReport` implements
//!   `Display` for the text summary.
//! - [`ReportError::kind`] classifies failures by the pipeline taxonomy.

pub mod config;
pub mod driver;
pub mod errors;
pub mod source;
pub mod summary;

pub use self::config::ReportConfig;
pub use self::driver::{VolatilityReport, run_report, run_report_on_prices};
pub use self::errors::{ErrorKind, ReportError, ReportResult};
pub use self::source::{CsvPriceSource, Observation, PriceSource};
pub use self::summary::ReportSummary;

pub mod prelude {
    pub use super::{
        CsvPriceSource, ErrorKind, PriceSource, ReportConfig, ReportError, ReportResult,
        ReportSummary, VolatilityReport, run_report, run_report_on_prices,
    };
}
