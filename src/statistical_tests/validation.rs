//! statistical_tests::validation — shared input guards for test statistics.
//!
//! Every public diagnostic calls these before computing anything, so the
//! statistics themselves can assume finite input of sufficient length.
use crate::statistical_tests::errors::{DiagResult, DiagnosticError};

/// At least `required` observations, all finite.
pub fn validate_series(data: &[f64], required: usize) -> DiagResult<()> {
    if data.len() < required {
        return Err(DiagnosticError::InsufficientData { len: data.len(), required });
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DiagnosticError::NonFiniteData { index, value });
    }
    Ok(())
}

/// Non-empty and `1 ≤ lag < n` for every lag.
pub fn validate_lags(lags: &[usize], n: usize) -> DiagResult<()> {
    if lags.is_empty() {
        return Err(DiagnosticError::EmptyLags);
    }
    if let Some(&lag) = lags.iter().find(|&&lag| lag == 0 || lag >= n) {
        return Err(DiagnosticError::InvalidLag { lag, len: n });
    }
    Ok(())
}

/// Rejects a zero-variance sequence. `variance` is the population variance
/// and `mean` its centre; the threshold is relative to `max(1, mean²)`.
pub fn validate_variance(variance: f64, mean: f64) -> DiagResult<()> {
    if !(variance > 1e-12 * (mean * mean).max(1.0)) {
        return Err(DiagnosticError::DegenerateData { variance });
    }
    Ok(())
}
