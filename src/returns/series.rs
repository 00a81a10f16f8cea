//! Percentage log returns built from a [`PriceSeries`].
//!
//! `r_t = 100 · ln(p_t / p_{t−1})` for `t = 1..N−1`, dated with the later
//! observation. Any non-finite or non-positive price aborts the build: a
//! silently skipped row would shift every later return off its date.
use crate::returns::{
    errors::{ReturnsError, ReturnsResult},
    prices::PriceSeries,
};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};

/// Returns are expressed in percent.
pub const RETURN_SCALE: f64 = 100.0;

/// Dated percentage log returns; `dates()[t]` is the date of the later price.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Array1<f64>,
}

impl ReturnSeries {
    /// Builds `N − 1` returns from `N ≥ 2` prices.
    ///
    /// # Errors
    /// - [`ReturnsError::InsufficientData`] when `N < 2`.
    /// - [`ReturnsError::InvalidPrice`] on the first price that is not finite
    ///   and strictly positive.
    pub fn from_prices(prices: &PriceSeries) -> ReturnsResult<Self> {
        let n = prices.len();
        if n < 2 {
            return Err(ReturnsError::InsufficientData { len: n, required: 2 });
        }
        let p = prices.prices();
        for (index, &value) in p.iter().enumerate() {
            let reason = if !value.is_finite() {
                "prices must be finite"
            } else if value <= 0.0 {
                "prices must be strictly positive"
            } else {
                continue;
            };
            return Err(ReturnsError::InvalidPrice {
                index,
                date: prices.dates()[index],
                value,
                reason,
            });
        }

        let values: Array1<f64> =
            p.windows(2).into_iter().map(|w| RETURN_SCALE * (w[1] / w[0]).ln()).collect();
        Ok(ReturnSeries { dates: prices.dates()[1..].to_vec(), values })
    }

    /// Inverts the transform: `p_t = p_{t−1} · exp(r_t / 100)`, starting from
    /// `initial_price`. The output has `len() + 1` entries.
    pub fn reconstruct_prices(&self, initial_price: f64) -> ReturnsResult<Array1<f64>> {
        if !(initial_price.is_finite() && initial_price > 0.0) {
            return Err(ReturnsError::InvalidInitialPrice { value: initial_price });
        }
        let mut out = Array1::zeros(self.values.len() + 1);
        out[0] = initial_price;
        for (t, &r) in self.values.iter().enumerate() {
            out[t + 1] = out[t] * (r / RETURN_SCALE).exp();
        }
        Ok(out)
    }

    /// Number of returns, one fewer than the source prices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a series built by [`ReturnSeries::from_prices`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return dates; the first is the date of the second price.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns in percent, aligned with [`ReturnSeries::dates`].
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }
}
