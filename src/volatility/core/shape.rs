//! Model order (p, q) for GARCH models.
//!
//! - `p`: number of **ARCH terms** (α₁…α_p on lagged squared shocks ε²).
//! - `q`: number of **GARCH terms** (β₁…β_q on lagged variances σ²).
//!
//! `p ≥ 1` is required: without an ARCH term the variance never reacts to
//! the data and the β coefficients are not identified.
use crate::volatility::errors::{GarchError, GarchResult};

/// Largest order accepted for either lag set.
pub const MAX_ORDER: usize = 20;

/// Order of the GARCH(p, q) model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarchShape {
    pub p: usize,
    pub q: usize,
}

impl GarchShape {
    /// Construct a validated GARCH(p, q) shape.
    ///
    /// # Errors
    /// - [`GarchError::InvalidModelShape`] if `p == 0`, or if either order
    ///   exceeds [`MAX_ORDER`].
    pub fn new(p: usize, q: usize) -> GarchResult<Self> {
        if p == 0 {
            return Err(GarchError::InvalidModelShape {
                p,
                q,
                reason: "at least one ARCH term (p >= 1) is required.",
            });
        }
        if p > MAX_ORDER || q > MAX_ORDER {
            return Err(GarchError::InvalidModelShape {
                p,
                q,
                reason: "lag orders above 20 are not supported.",
            });
        }
        Ok(GarchShape { p, q })
    }

    /// Number of variance-recursion coefficients `p + q`.
    pub fn n_coeffs(&self) -> usize {
        self.p + self.q
    }

    /// Columns of the variance-derivative matrix: μ, ω, α₁…α_p, β₁…β_q.
    pub fn n_mean_variance(&self) -> usize {
        2 + self.p + self.q
    }

    /// Largest lag reached by the recursion.
    pub fn max_lag(&self) -> usize {
        self.p.max(self.q)
    }
}

impl Default for GarchShape {
    fn default() -> Self {
        GarchShape { p: 1, q: 1 }
    }
}

impl std::fmt::Display for GarchShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GARCH({}, {})", self.p, self.q)
    }
}
