//! Numerically stable maps between unconstrained optimizer space and
//! constrained model space.
//!
//! Purpose
//! -------
//! Provide the scalar and vector transforms used to keep GARCH parameters
//! inside their admissible region for every optimizer iterate, together with
//! the Jacobian helpers needed to push gradients and covariances through
//! those maps.
//!
//! Key behaviors
//! -------------
//! - [`safe_softplus`] / [`safe_softplus_inv`] map ℝ ↔ (0, ∞) without
//!   overflow (used for ω and for the ν offset).
//! - [`safe_logistic`] is the derivative of softplus.
//! - [`safe_softmax`] maps logits to `(α, β, slack)` on a simplex of mass
//!   `1 − STATIONARITY_MARGIN`, with slack acting as the zero-logit baseline.
//! - [`safe_softmax_deriv`] applies the Jacobian of that map to a gradient
//!   in place.
//! - [`delta_method`] sandwiches a covariance matrix with a Jacobian.
//!
//! Invariants & assumptions
//! ------------------------
//! - Softmax outputs are finite, non-negative and satisfy
//!   `Σα + Σβ + slack = 1 − STATIONARITY_MARGIN` up to rounding.
//! - All functions are pure; none allocate except [`delta_method`].
//!
//! Testing notes
//! -------------
//! - Unit tests check round-trips, simplex mass, and the softmax Jacobian
//!   against central differences.
use ndarray::{Array2, ArrayView1, ArrayViewMut1};

/// Safety margin reserved below the stationarity boundary `Σα + Σβ = 1`.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Lower clamp applied to probabilities before taking logs in inverse maps.
pub const LOGIT_EPS: f64 = 1e-12;

/// Eigenvalues at or below this threshold are dropped in pseudo-inverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// Generic absolute tolerance for "numerically zero" checks.
pub const GENERAL_TOL: f64 = 1e-12;

/// `ln(1 + exp(x))`, linear above the `x > 20` cutoff.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Inverse of softplus on `(0, ∞)`: `ln(exp(x) − 1)`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Logistic sigmoid `1 / (1 + exp(−x))`, evaluated on the branch that
/// cannot overflow.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Scaled softmax with an implicit zero-logit slack category.
///
/// Writes `α_i = M·exp(x_i)/D` and `β_j = M·exp(x_{p+j})/D` into the output
/// views, where `M = 1 − STATIONARITY_MARGIN` and
/// `D = exp(0) + Σ exp(x_k)`, and returns `slack = M/D`. A max-shift keeps
/// the exponentials bounded.
///
/// `logits` must have length `alpha.len() + beta.len()`.
pub fn safe_softmax(
    mut alpha: ArrayViewMut1<f64>, mut beta: ArrayViewMut1<f64>, logits: &ArrayView1<f64>,
) -> f64 {
    let p = alpha.len();
    let mass = 1.0 - STATIONARITY_MARGIN;
    let shift = logits.iter().fold(0.0_f64, |m, &x| m.max(x));
    let baseline = (-shift).exp();
    let denom = logits.iter().fold(baseline, |acc, &x| acc + (x - shift).exp());

    for (i, a) in alpha.iter_mut().enumerate() {
        *a = mass * (logits[i] - shift).exp() / denom;
    }
    for (j, b) in beta.iter_mut().enumerate() {
        *b = mass * (logits[p + j] - shift).exp() / denom;
    }
    mass * baseline / denom
}

/// Pulls a model-space gradient over `(α, β)` back to the softmax logits.
///
/// On entry `grad` holds `∂ℓ/∂α_1..α_p, ∂ℓ/∂β_1..β_q`; on exit it holds
/// `∂ℓ/∂x_m = π_m (g_m − Σ_k π_k g_k / M)` where `π = (α, β)` and
/// `M = 1 − STATIONARITY_MARGIN`.
pub fn safe_softmax_deriv(
    alpha: &ArrayView1<f64>, beta: &ArrayView1<f64>, grad: &mut ArrayViewMut1<f64>,
) {
    let p = alpha.len();
    let mass = 1.0 - STATIONARITY_MARGIN;
    let pi = |k: usize| if k < p { alpha[k] } else { beta[k - p] };
    let weighted: f64 = grad.iter().enumerate().map(|(k, &g)| pi(k) * g).sum::<f64>() / mass;
    for (m, g) in grad.iter_mut().enumerate() {
        *g = pi(m) * (*g - weighted);
    }
}

/// Delta-method sandwich `J Σ Jᵀ`.
///
/// `jacobian` is `(m × k)` with rows indexed by the target quantities and
/// columns by the source parameters; `cov` is the `(k × k)` source
/// covariance.
pub fn delta_method(cov: &Array2<f64>, jacobian: &Array2<f64>) -> Array2<f64> {
    jacobian.dot(cov).dot(&jacobian.t())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - softplus / inverse softplus round-trips on both sides of the cutoff.
    // - Overflow-free logistic evaluation.
    // - Simplex mass and non-negativity of the scaled softmax.
    // - The softmax Jacobian-vector product against central differences.
    // - The delta-method sandwich on a diagonal example.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check that `safe_softplus_inv` inverts `safe_softplus`.
    //
    // Given
    // -----
    // - Inputs below and above the linear cutoff.
    //
    // Expect
    // ------
    // - `softplus(softplus_inv(x)) ≈ x` for every positive `x`.
    fn softplus_roundtrip_recovers_input() {
        // Arrange
        let inputs = [1e-6_f64, 0.3, 2.0, 19.5, 25.0, 400.0];

        for &x in &inputs {
            // Act
            let back = safe_softplus(safe_softplus_inv(x));

            // Assert
            assert_relative_eq!(back, x, max_relative = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the logistic function stays finite in both tails.
    //
    // Given
    // -----
    // - Extreme arguments ±800.
    //
    // Expect
    // ------
    // - Values are 0 and 1 respectively and `σ(0) = 0.5`.
    fn logistic_is_finite_in_tails() {
        // Act & Assert
        assert_eq!(safe_logistic(-800.0), 0.0);
        assert_eq!(safe_logistic(800.0), 1.0);
        assert_relative_eq!(safe_logistic(0.0), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the scaled softmax lands on the stationarity simplex.
    //
    // Given
    // -----
    // - p = 1, q = 2 with large, mixed-sign logits.
    //
    // Expect
    // ------
    // - All outputs are non-negative and finite.
    // - `Σα + Σβ + slack = 1 − STATIONARITY_MARGIN`.
    fn softmax_outputs_lie_on_scaled_simplex() {
        // Arrange
        let logits = array![350.0_f64, -40.0, 2.5];
        let mut alpha = Array1::<f64>::zeros(1);
        let mut beta = Array1::<f64>::zeros(2);

        // Act
        let slack = safe_softmax(alpha.view_mut(), beta.view_mut(), &logits.view());

        // Assert
        assert!(alpha.iter().chain(beta.iter()).all(|v| v.is_finite() && *v >= 0.0));
        assert!(slack >= 0.0);
        assert_relative_eq!(
            alpha.sum() + beta.sum() + slack,
            1.0 - STATIONARITY_MARGIN,
            epsilon = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // Validate `safe_softmax_deriv` against a numerical Jacobian.
    //
    // Given
    // -----
    // - A linear functional `L(α, β) = wᵀ(α, β)` so that `∂L/∂π = w`.
    //
    // Expect
    // ------
    // - The pulled-back gradient matches central differences of
    //   `L(softmax(x))` in every logit.
    fn softmax_deriv_matches_central_differences() {
        // Arrange
        let logits = array![-0.4_f64, 1.3, 0.2];
        let w = array![0.7_f64, -1.1, 2.0];
        let eval = |x: &Array1<f64>| {
            let mut a = Array1::<f64>::zeros(1);
            let mut b = Array1::<f64>::zeros(2);
            safe_softmax(a.view_mut(), b.view_mut(), &x.view());
            w[0] * a[0] + w[1] * b[0] + w[2] * b[1]
        };
        let mut alpha = Array1::<f64>::zeros(1);
        let mut beta = Array1::<f64>::zeros(2);
        safe_softmax(alpha.view_mut(), beta.view_mut(), &logits.view());

        // Act
        let mut grad = w.clone();
        safe_softmax_deriv(&alpha.view(), &beta.view(), &mut grad.view_mut());

        // Assert
        let h = 1e-6;
        for m in 0..3 {
            let mut up = logits.clone();
            let mut dn = logits.clone();
            up[m] += h;
            dn[m] -= h;
            let fd = (eval(&up) - eval(&dn)) / (2.0 * h);
            assert_relative_eq!(grad[m], fd, epsilon = 1e-8);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the delta-method sandwich for a diagonal Jacobian.
    //
    // Given
    // -----
    // - Σ = diag(1, 4) and J = diag(2, 0.5).
    //
    // Expect
    // ------
    // - J Σ Jᵀ = diag(4, 1).
    fn delta_method_scales_diagonal_covariance() {
        // Arrange
        let cov = array![[1.0_f64, 0.0], [0.0, 4.0]];
        let jac = array![[2.0_f64, 0.0], [0.0, 0.5]];

        // Act
        let out = delta_method(&cov, &jac);

        // Assert
        assert_relative_eq!(out[[0, 0]], 4.0);
        assert_relative_eq!(out[[1, 1]], 1.0);
        assert_relative_eq!(out[[0, 1]], 0.0);
    }
}
