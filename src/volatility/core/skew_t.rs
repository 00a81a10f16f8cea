//! Hansen (1994) skewed Student-t density for standardized innovations.
//!
//! Purpose
//! -------
//! Evaluate the log-density of a zero-mean, unit-variance skewed Student-t
//! variable and its score with respect to the argument and both shape
//! parameters. This is the only special-function numerics in the volatility
//! stack; everything is accumulated in log space so that long samples never
//! underflow.
//!
//! Key behaviors
//! -------------
//! - [`SkewT::new`] validates `(ν, λ)` and precomputes the constants
//!   `c`, `a`, `b` together with their derivatives in `ν` and `λ`.
//! - [`SkewT::log_density`] / [`SkewT::density`] evaluate `g(z; ν, λ)`.
//! - [`SkewT::score`] returns `ln g` and `∂ln g/∂(z, ν, λ)` in one pass.
//! - [`density`] and [`log_likelihood`] are stateless convenience wrappers
//!   for one-off evaluations.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ν > 2` (finite variance) and `−1 < λ < 1`.
//! - The density has mean 0 and variance 1 for every admissible `(ν, λ)`,
//!   so `ε_t = σ_t z_t` has conditional variance `σ²_t`.
//! - `λ = 0` reduces to the standardized symmetric Student-t.
//!
//! Conventions
//! -----------
//! With `c = Γ((ν+1)/2) / (√(π(ν−2)) Γ(ν/2))`, `a = 4λc(ν−2)/(ν−1)` and
//! `b² = 1 + 3λ² − a²`:
//!
//! ```text
//! g(z) = b·c·(1 + w²/(ν−2))^{−(ν+1)/2},   w = (b z + a) / (1 ∓ λ)
//! ```
//!
//! using `1 − λ` for `z < −a/b` and `1 + λ` otherwise.
use crate::volatility::errors::{GarchError, GarchResult, ParamError, ParamResult};
use ndarray::ArrayView1;
use statrs::function::gamma::{digamma, ln_gamma};
use std::f64::consts::PI;

/// Log-density and its partial derivatives at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewTScore {
    pub log_density: f64,
    pub d_z: f64,
    pub d_nu: f64,
    pub d_lambda: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewT {
    nu: f64,
    lambda: f64,
    ln_c: f64,
    a: f64,
    b: f64,
    ln_b: f64,
    da_dnu: f64,
    da_dlambda: f64,
    db_dnu: f64,
    db_dlambda: f64,
    dln_c_dnu: f64,
}

impl SkewT {
    /// # Errors
    /// - [`ParamError::InvalidNu`] unless `ν` is finite and `> 2`.
    /// - [`ParamError::InvalidLambda`] unless `λ` is finite and in `(−1, 1)`.
    pub fn new(nu: f64, lambda: f64) -> ParamResult<Self> {
        if !nu.is_finite() || nu <= 2.0 {
            return Err(ParamError::InvalidNu { value: nu });
        }
        if !lambda.is_finite() || lambda.abs() >= 1.0 {
            return Err(ParamError::InvalidLambda { value: lambda });
        }

        let ln_c = ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu) - 0.5 * (PI * (nu - 2.0)).ln();
        let c = ln_c.exp();
        let k = (nu - 2.0) / (nu - 1.0);
        let a = 4.0 * lambda * c * k;
        let b = (1.0 + 3.0 * lambda * lambda - a * a).sqrt();

        let dln_c_dnu =
            0.5 * digamma(0.5 * (nu + 1.0)) - 0.5 * digamma(0.5 * nu) - 0.5 / (nu - 2.0);
        let da_dnu = 4.0 * lambda * (c * dln_c_dnu * k + c / ((nu - 1.0) * (nu - 1.0)));
        let da_dlambda = 4.0 * c * k;
        let db_dnu = -a * da_dnu / b;
        let db_dlambda = (3.0 * lambda - a * da_dlambda) / b;

        Ok(SkewT {
            nu,
            lambda,
            ln_c,
            a,
            b,
            ln_b: b.ln(),
            da_dnu,
            da_dlambda,
            db_dnu,
            db_dlambda,
            dln_c_dnu,
        })
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn log_density(&self, z: f64) -> f64 {
        let (w, _, _) = self.w(z);
        let u = 1.0 + w * w / (self.nu - 2.0);
        self.ln_b + self.ln_c - 0.5 * (self.nu + 1.0) * u.ln()
    }

    pub fn density(&self, z: f64) -> f64 {
        self.log_density(z).exp()
    }

    /// `ln g(z)` and its derivatives in `z`, `ν` and `λ`.
    pub fn score(&self, z: f64) -> SkewTScore {
        let nu = self.nu;
        let nm2 = nu - 2.0;
        let (w, d, left) = self.w(z);
        let u = 1.0 + w * w / nm2;
        let half_np1 = 0.5 * (nu + 1.0);
        // d = 1 − λ on the left branch, 1 + λ on the right.
        let dd_dlambda = if left { -1.0 } else { 1.0 };

        let dw_dz = self.b / d;
        let dw_dnu = (z * self.db_dnu + self.da_dnu) / d;
        let dw_dlambda = (z * self.db_dlambda + self.da_dlambda) / d - w * dd_dlambda / d;

        let d_z = -(nu + 1.0) * w * dw_dz / (nm2 * u);
        let du_dnu = 2.0 * w * dw_dnu / nm2 - w * w / (nm2 * nm2);
        let d_nu = self.db_dnu / self.b + self.dln_c_dnu - 0.5 * u.ln() - half_np1 * du_dnu / u;
        let d_lambda = self.db_dlambda / self.b - half_np1 * (2.0 * w * dw_dlambda / nm2) / u;

        SkewTScore {
            log_density: self.ln_b + self.ln_c - half_np1 * u.ln(),
            d_z,
            d_nu,
            d_lambda,
        }
    }

    /// `Σ_t [ln g((r_t − μ)/σ_t) − ln σ_t]`.
    pub fn log_likelihood(
        &self, returns: ArrayView1<f64>, sigma: ArrayView1<f64>, mu: f64,
    ) -> GarchResult<f64> {
        if returns.len() != sigma.len() {
            return Err(GarchError::LengthMismatch {
                expected: returns.len(),
                actual: sigma.len(),
            });
        }
        returns.iter().zip(sigma.iter()).enumerate().try_fold(0.0, |acc, (t, (&r, &s))| {
            if !s.is_finite() || s <= 0.0 {
                return Err(GarchError::InvalidVariance { index: t, value: s * s });
            }
            Ok(acc + self.log_density((r - mu) / s) - s.ln())
        })
    }

    // ---- Helper methods ----

    /// Returns `(w, d, left)` for the branch selected by `z`.
    fn w(&self, z: f64) -> (f64, f64, bool) {
        let left = z < -self.a / self.b;
        let d = if left { 1.0 - self.lambda } else { 1.0 + self.lambda };
        ((self.b * z + self.a) / d, d, left)
    }
}

/// `g(z; ν, λ)`.
pub fn density(z: f64, nu: f64, lambda: f64) -> ParamResult<f64> {
    Ok(SkewT::new(nu, lambda)?.density(z))
}

/// Log-likelihood of a return sequence given conditional standard
/// deviations `σ_t`, mean `μ` and shape `(ν, λ)`.
pub fn log_likelihood(
    returns: ArrayView1<f64>, sigma: ArrayView1<f64>, mu: f64, nu: f64, lambda: f64,
) -> GarchResult<f64> {
    SkewT::new(nu, lambda)?.log_likelihood(returns, sigma, mu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Normalization, zero mean and unit variance of the density.
    // - Reduction to the standardized Student-t at λ = 0.
    // - The analytic score against central differences on both branches.
    // - Parameter validation and the sequence log-likelihood.
    //
    // They intentionally DO NOT cover:
    // - Tail accuracy beyond the integration window used below.
    // -------------------------------------------------------------------------

    /// Trapezoid integral of `f(z)·g(z)` over [−60, 60].
    fn integrate(dist: &SkewT, f: impl Fn(f64) -> f64) -> f64 {
        let (lo, hi, n) = (-60.0_f64, 60.0_f64, 240_000usize);
        let h = (hi - lo) / n as f64;
        let mut acc = 0.0;
        for i in 0..=n {
            let z = lo + i as f64 * h;
            let w = if i == 0 || i == n { 0.5 } else { 1.0 };
            acc += w * f(z) * dist.density(z);
        }
        acc * h
    }

    #[test]
    // Purpose
    // -------
    // Verify the density integrates to one with mean 0 and variance 1.
    //
    // Given
    // -----
    // - ν = 6, λ = −0.3 (moderately heavy tails, left skew).
    //
    // Expect
    // ------
    // - ∫g = 1, ∫z g = 0, ∫z² g = 1 to about 1e-4.
    fn density_is_standardized() {
        // Arrange
        let dist = SkewT::new(6.0, -0.3).expect("valid shape");

        // Act
        let mass = integrate(&dist, |_| 1.0);
        let mean = integrate(&dist, |z| z);
        let var = integrate(&dist, |z| z * z);

        // Assert
        assert_relative_eq!(mass, 1.0, epsilon = 1e-4);
        assert_relative_eq!(mean, 0.0, epsilon = 1e-4);
        assert_relative_eq!(var, 1.0, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Check that λ = 0 gives the standardized Student-t density.
    //
    // Given
    // -----
    // - ν = 5, λ = 0 and z = 1.3.
    //
    // Expect
    // ------
    // - `ln g(z) = ln c − (ν+1)/2 · ln(1 + z²/(ν−2))` with `b = 1`.
    fn zero_skew_matches_standardized_student_t() {
        // Arrange
        let nu = 5.0_f64;
        let z = 1.3_f64;
        let ln_c = ln_gamma(3.0) - ln_gamma(2.5) - 0.5 * (PI * 3.0).ln();

        // Act
        let lg = SkewT::new(nu, 0.0).expect("valid shape").log_density(z);

        // Assert
        assert_relative_eq!(lg, ln_c - 3.0 * (1.0 + z * z / 3.0).ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Validate every component of the analytic score against central
    // differences.
    //
    // Given
    // -----
    // - ν = 7.5, λ = 0.25 and points on both sides of the branch point.
    //
    // Expect
    // ------
    // - `d_z`, `d_nu`, `d_lambda` match numerical derivatives to 1e-6.
    fn score_matches_central_differences() {
        // Arrange
        let (nu, lambda) = (7.5_f64, 0.25_f64);
        let h = 1e-6;
        let lg = |z: f64, n: f64, l: f64| SkewT::new(n, l).expect("valid shape").log_density(z);
        let dist = SkewT::new(nu, lambda).expect("valid shape");

        for &z in &[-2.4_f64, -0.6, 0.1, 1.9] {
            // Act
            let s = dist.score(z);

            // Assert
            let fd_z = (lg(z + h, nu, lambda) - lg(z - h, nu, lambda)) / (2.0 * h);
            let fd_nu = (lg(z, nu + h, lambda) - lg(z, nu - h, lambda)) / (2.0 * h);
            let fd_l = (lg(z, nu, lambda + h) - lg(z, nu, lambda - h)) / (2.0 * h);
            assert_relative_eq!(s.log_density, dist.log_density(z), epsilon = 1e-14);
            assert_relative_eq!(s.d_z, fd_z, epsilon = 1e-6);
            assert_relative_eq!(s.d_nu, fd_nu, epsilon = 1e-6);
            assert_relative_eq!(s.d_lambda, fd_l, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure inadmissible shape parameters are rejected.
    //
    // Given
    // -----
    // - ν = 2, ν = NaN, λ = 1 and λ = −1.2.
    //
    // Expect
    // ------
    // - `InvalidNu` for the first two, `InvalidLambda` for the others.
    fn new_rejects_inadmissible_shapes() {
        // Act & Assert
        assert!(matches!(SkewT::new(2.0, 0.0), Err(ParamError::InvalidNu { .. })));
        assert!(matches!(SkewT::new(f64::NAN, 0.0), Err(ParamError::InvalidNu { .. })));
        assert!(matches!(SkewT::new(5.0, 1.0), Err(ParamError::InvalidLambda { .. })));
        assert!(matches!(density(0.0, 5.0, -1.2), Err(ParamError::InvalidLambda { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check the sequence log-likelihood against a manual sum and its input
    // validation.
    //
    // Given
    // -----
    // - Returns [0.5, −1.0, 2.0], σ = [1, 2, 0.5], μ = 0.1, ν = 8, λ = 0.1.
    //
    // Expect
    // ------
    // - The sum of `ln g(z_t) − ln σ_t`.
    // - `LengthMismatch` for mismatched inputs and `InvalidVariance` for σ = 0.
    fn log_likelihood_sums_per_observation_terms() {
        // Arrange
        let r = array![0.5_f64, -1.0, 2.0];
        let s = array![1.0_f64, 2.0, 0.5];
        let dist = SkewT::new(8.0, 0.1).expect("valid shape");
        let manual: f64 = r
            .iter()
            .zip(s.iter())
            .map(|(&x, &sd)| dist.log_density((x - 0.1) / sd) - sd.ln())
            .sum();

        // Act
        let ll = log_likelihood(r.view(), s.view(), 0.1, 8.0, 0.1).expect("valid inputs");

        // Assert
        assert_relative_eq!(ll, manual, epsilon = 1e-12);
        assert!(matches!(
            log_likelihood(r.view(), s.slice(ndarray::s![..2]), 0.1, 8.0, 0.1),
            Err(GarchError::LengthMismatch { expected: 3, actual: 2 })
        ));
        let bad = array![1.0_f64, 0.0, 1.0];
        assert!(matches!(
            log_likelihood(r.view(), bad.view(), 0.1, 8.0, 0.1),
            Err(GarchError::InvalidVariance { index: 1, .. })
        ));
    }
}
