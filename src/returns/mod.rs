//! returns — price validation and percentage log returns.
//!
//! Purpose
//! -------
//! First stage of the pipeline: take an adjusted-close [`PriceSeries`] and
//! produce a [`ReturnSeries`] of `100·ln(p_t/p_{t−1})`.
//!
//! Key behaviors
//! -------------
//! - Missing quotes are resolved explicitly through [`MissingPricePolicy`].
//! - Any non-finite or non-positive price aborts the build with
//!   [`ReturnsError::InvalidPrice`]; fewer than two prices fail with
//!   [`ReturnsError::InsufficientData`].
//! - [`ReturnSeries::reconstruct_prices`] inverts the transform.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ReturnSeries::len() == PriceSeries::len() − 1` and return `t` carries
//!   the date of price `t + 1`.
//! - Both containers are immutable after construction.

pub mod errors;
pub mod prices;
pub mod series;

pub use self::errors::{ReturnsError, ReturnsResult};
pub use self::prices::{MissingPricePolicy, PriceSeries};
pub use self::series::{RETURN_SCALE, ReturnSeries};

pub mod prelude {
    pub use super::errors::{ReturnsError, ReturnsResult};
    pub use super::prices::{MissingPricePolicy, PriceSeries};
    pub use super::series::ReturnSeries;
}
