//! Bounds on the conditional variance during recursion.
//!
//! [`VarianceGuards`] keeps `σ²_t` inside `[min, max]` while the optimizer
//! explores θ-space. A clamped observation contributes no variance
//! sensitivity to the gradient, matching the flat clamped likelihood.
use crate::volatility::errors::{GarchError, GarchResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    pub min: f64,
    pub max: f64,
}

impl VarianceGuards {
    /// # Errors
    /// [`GarchError::InvalidVarianceGuards`] unless `0 < min < max < ∞`.
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        if !min.is_finite() || !max.is_finite() {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "bounds must be finite.",
            });
        }
        if min <= 0.0 {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "lower bound must be strictly positive.",
            });
        }
        if min >= max {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "lower bound must be below the upper bound.",
            });
        }
        Ok(VarianceGuards { min, max })
    }

    /// Returns the clamped value and whether clamping happened.
    pub fn guard(&self, sigma2: f64) -> (f64, bool) {
        if sigma2 < self.min || sigma2.is_nan() {
            (self.min, true)
        } else if sigma2 > self.max {
            (self.max, true)
        } else {
            (sigma2, false)
        }
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        VarianceGuards { min: 1e-10, max: 1e10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation.
    // - Clamping on both sides and NaN handling.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Validate `VarianceGuards::new`.
    //
    // Given
    // -----
    // - (1e-8, 1e8), (0, 1), (2, 1) and (1, ∞).
    //
    // Expect
    // ------
    // - Only the first is accepted.
    fn new_validates_bounds() {
        // Act & Assert
        assert!(VarianceGuards::new((1e-8, 1e8)).is_ok());
        assert!(matches!(
            VarianceGuards::new((0.0, 1.0)),
            Err(GarchError::InvalidVarianceGuards { .. })
        ));
        assert!(VarianceGuards::new((2.0, 1.0)).is_err());
        assert!(VarianceGuards::new((1.0, f64::INFINITY)).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Check clamping behavior.
    //
    // Given
    // -----
    // - Guards (0.1, 10) and inputs 0.01, 5, 50, NaN.
    //
    // Expect
    // ------
    // - (0.1, true), (5, false), (10, true), (0.1, true).
    fn guard_clamps_and_flags() {
        // Arrange
        let g = VarianceGuards::new((0.1, 10.0)).expect("valid guards");

        // Act & Assert
        assert_eq!(g.guard(0.01), (0.1, true));
        assert_eq!(g.guard(5.0), (5.0, false));
        assert_eq!(g.guard(50.0), (10.0, true));
        assert_eq!(g.guard(f64::NAN), (0.1, true));
    }
}
