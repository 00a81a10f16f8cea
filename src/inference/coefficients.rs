//! Coefficient table: estimate, standard error, t-statistic and p-value.
//!
//! p-values are two-sided under the asymptotic normal approximation,
//! `2·(1 − Φ(|t|))`. Missing standard errors leave the inferential
//! columns empty rather than inventing values.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// One line of the coefficient table. The three inference columns are all
/// `Some` or all `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientRow {
    /// e.g. `"omega"`, `"alpha[1]"`, `"nu"`.
    pub name: String,
    pub estimate: f64,
    pub std_error: Option<f64>,
    pub t_stat: Option<f64>,
    pub p_value: Option<f64>,
}

/// Builds one row per parameter.
///
/// # Errors
/// [`InferenceError::DimensionMismatch`] if `names`, `estimates` and
/// `std_errors` (when present) disagree in length.
pub fn coefficient_table(
    names: &[String], estimates: ArrayView1<f64>, std_errors: Option<&Array1<f64>>,
) -> InferenceResult<Vec<CoefficientRow>> {
    if names.len() != estimates.len() {
        return Err(InferenceError::DimensionMismatch {
            expected: names.len(),
            found: estimates.len(),
        });
    }
    if let Some(se) = std_errors.filter(|se| se.len() != estimates.len()) {
        return Err(InferenceError::DimensionMismatch {
            expected: estimates.len(),
            found: se.len(),
        });
    }
    let std_normal = Normal::standard();

    Ok(names
        .iter()
        .zip(estimates.iter())
        .enumerate()
        .map(|(i, (name, &estimate))| {
            let std_error = std_errors.map(|se| se[i]).filter(|se| se.is_finite() && *se > 0.0);
            let t_stat = std_error.map(|se| estimate / se);
            let p_value = t_stat.map(|t| 2.0 * (1.0 - std_normal.cdf(t.abs())));
            CoefficientRow { name: name.clone(), estimate, std_error, t_stat, p_value }
        })
        .collect())
}
