//! Adjusted-close price history and the policy for missing quotes.
//!
//! Purpose
//! -------
//! Hold a time-ordered, de-duplicated price history as delivered by a quote
//! source, and make the treatment of missing quotes an explicit choice
//! instead of an accident of the upstream feed.
//!
//! Key behaviors
//! -------------
//! - [`PriceSeries::new`] checks that dates and prices line up and that
//!   dates are strictly increasing. Price *values* are checked by the
//!   return builder, which is where a bad price becomes fatal.
//! - [`PriceSeries::from_observations`] resolves `Option<f64>` quotes with a
//!   [`MissingPricePolicy`]:
//!   - `Reject` (default) fails on the first missing quote;
//!   - `ForwardFill` carries the previous quote forward, but a missing
//!     first quote still fails since there is nothing to carry.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dates.len() == prices.len()` and dates are strictly increasing.
//! - A `PriceSeries` is immutable once built.
use crate::returns::errors::{ReturnsError, ReturnsResult};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How to treat a date whose quote is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPricePolicy {
    #[default]
    Reject,
    ForwardFill,
}

impl FromStr for MissingPricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "reject" | "fail" => Ok(MissingPricePolicy::Reject),
            "forward-fill" | "ffill" => Ok(MissingPricePolicy::ForwardFill),
            other => Err(format!("unknown missing-price policy '{other}' (reject | forward-fill)")),
        }
    }
}

/// PriceSeries
///
/// Purpose
/// -------
/// Dated adjusted-close prices in strictly increasing date order. This is
/// the pipeline's raw input; returns are derived from it by
/// [`ReturnSeries::from_prices`](crate::returns::ReturnSeries::from_prices).
///
/// Fields
/// ------
/// - `dates`: `Vec<NaiveDate>`
///   Observation dates, strictly increasing.
/// - `prices`: `Array1<f64>`
///   One price per date. Not yet checked for positivity.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Array1<f64>,
}

impl PriceSeries {
    /// Build a series from parallel date and price vectors.
    ///
    /// Parameters
    /// ----------
    /// - `dates`: `Vec<NaiveDate>`
    ///   Observation dates. Must be strictly increasing, so duplicates are
    ///   rejected.
    /// - `prices`: `Vec<f64>`
    ///   Prices aligned with `dates`.
    ///
    /// Returns
    /// -------
    /// `ReturnsResult<PriceSeries>`
    ///   The validated series.
    ///
    /// Errors
    /// ------
    /// - `ReturnsError::LengthMismatch`
    ///   Returned when `dates.len() != prices.len()`.
    /// - `ReturnsError::NonIncreasingDates`
    ///   Returned at the first date that does not follow its predecessor.
    ///
    /// Notes
    /// -----
    /// - Empty and single-element series are accepted here. The return
    ///   builder decides whether there is enough data.
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> ReturnsResult<Self> {
        if dates.len() != prices.len() {
            return Err(ReturnsError::LengthMismatch { dates: dates.len(), prices: prices.len() });
        }
        if let Some(index) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ReturnsError::NonIncreasingDates {
                index: index + 1,
                previous: dates[index],
                current: dates[index + 1],
            });
        }
        Ok(PriceSeries { dates, prices: Array1::from(prices) })
    }

    /// Build a series from `(date, quote)` pairs that may lack a quote.
    ///
    /// Parameters
    /// ----------
    /// - `observations`: `Vec<(NaiveDate, Option<f64>)>`
    ///   Quotes in date order, as delivered by a price source.
    /// - `policy`: `MissingPricePolicy`
    ///   `Reject` fails on a missing quote. `ForwardFill` repeats the last
    ///   available quote.
    ///
    /// Returns
    /// -------
    /// `ReturnsResult<PriceSeries>`
    ///   One price per observation; no rows are dropped.
    ///
    /// Errors
    /// ------
    /// - `ReturnsError::InvalidPrice`
    ///   Returned for a missing quote under `Reject`, or for a missing first
    ///   quote under `ForwardFill`. `value` is NaN in both cases.
    /// - Any error of [`PriceSeries::new`].
    pub fn from_observations(
        observations: Vec<(NaiveDate, Option<f64>)>, policy: MissingPricePolicy,
    ) -> ReturnsResult<Self> {
        let mut dates = Vec::with_capacity(observations.len());
        let mut prices = Vec::with_capacity(observations.len());
        let mut last: Option<f64> = None;

        for (index, (date, quote)) in observations.into_iter().enumerate() {
            let price = match (quote, policy) {
                (Some(p), _) => p,
                (None, MissingPricePolicy::ForwardFill) => {
                    last.ok_or(ReturnsError::InvalidPrice {
                        index,
                        date,
                        value: f64::NAN,
                        reason: "missing leading price cannot be forward-filled",
                    })?
                }
                (None, MissingPricePolicy::Reject) => {
                    return Err(ReturnsError::InvalidPrice {
                        index,
                        date,
                        value: f64::NAN,
                        reason: "missing price",
                    });
                }
            };
            last = Some(price);
            dates.push(date);
            prices.push(price);
        }
        PriceSeries::new(dates, prices)
    }

    /// Number of dated prices.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Prices aligned with [`PriceSeries::dates`].
    pub fn prices(&self) -> ArrayView1<'_, f64> {
        self.prices.view()
    }
}
