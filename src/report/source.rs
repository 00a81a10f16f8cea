//! Price sources keyed by (ticker, start, end).
//!
//! The pipeline only needs time-ordered adjusted-close quotes; where they
//! come from is behind [`PriceSource`]. [`CsvPriceSource`] reads
//! `<dir>/<TICKER>.csv` with a `date,adj_close` header, where an empty
//! `adj_close` marks a missing quote. Missing quotes are returned as
//! `None` and resolved later by the configured `MissingPricePolicy`.
use crate::report::errors::{ReportError, ReportResult};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `(date, adjusted close)` with `None` for a missing quote.
pub type Observation = (NaiveDate, Option<f64>);

/// Anything that can deliver dated quotes for a ticker.
pub trait PriceSource {
    /// Quotes for `ticker` with `start ≤ date ≤ end`, in file order.
    fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
    -> ReportResult<Vec<Observation>>;
}

/// CsvPriceSource
///
/// Purpose
/// -------
/// Read quotes from one CSV file per ticker in a local directory.
///
/// File format
/// -----------
/// - Path: `<dir>/<TICKER>.csv`, ticker upper-cased.
/// - Header `date,adj_close`; dates as `YYYY-MM-DD`. Surrounding whitespace
///   is trimmed.
/// - An empty `adj_close` is a missing quote. Any other unparsable field is
///   a `ReportError::Source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: NaiveDate,
    adj_close: Option<f64>,
}

impl CsvPriceSource {
    /// Source rooted at `dir`. The directory is not checked until `fetch`.
    pub fn new(dir: impl Into<PathBuf>) -> CsvPriceSource {
        CsvPriceSource { dir: dir.into() }
    }

    /// File that holds `ticker`'s quotes.
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker.to_uppercase()))
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch(
        &self, ticker: &str, start: NaiveDate, end: NaiveDate,
    ) -> ReportResult<Vec<Observation>> {
        let path = self.path_for(ticker);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|err| source_error(&path, err))?;

        let mut out = Vec::new();
        for record in reader.deserialize::<PriceRecord>() {
            let record = record.map_err(|err| source_error(&path, err))?;
            if record.date >= start && record.date <= end {
                out.push((record.date, record.adj_close));
            }
        }
        debug!(path = %path.display(), rows = out.len(), "prices loaded");
        Ok(out)
    }
}

fn source_error(path: &Path, err: csv::Error) -> ReportError {
    ReportError::Source { path: path.display().to_string(), text: err.to_string() }
}
