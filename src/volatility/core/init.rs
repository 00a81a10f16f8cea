//! Starting values for the likelihood optimizer.
//!
//! Key behaviors
//! -------------
//! - [`StartingValues::Heuristic`] derives a deterministic start from the
//!   sample: μ = r̄, α spread over a total of 0.08 (0.15 for pure ARCH), β
//!   spread over 0.90, ω = s²·(1 − Σα − Σβ), ν = 8, λ = 0.
//! - [`StartingValues::Fixed`] uses caller-supplied parameters after
//!   checking them against the model shape and innovation family.
//!
//! The heuristic start keeps the implied unconditional variance equal to
//! the sample variance.
use crate::volatility::{
    core::{
        data::GarchData, innovations::Innovation, params::GarchParams, shape::GarchShape,
    },
    errors::GarchResult,
};
use ndarray::Array1;

/// Total ARCH weight of the heuristic start when β terms are present.
pub const HEURISTIC_ALPHA_TOTAL: f64 = 0.08;

/// Total ARCH weight of the heuristic start for pure ARCH models.
pub const HEURISTIC_ARCH_ONLY_TOTAL: f64 = 0.15;

pub const HEURISTIC_BETA_TOTAL: f64 = 0.90;

pub const HEURISTIC_NU: f64 = 8.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StartingValues {
    #[default]
    Heuristic,
    Fixed(GarchParams),
}

impl StartingValues {
    pub const fn heuristic() -> Self {
        StartingValues::Heuristic
    }

    /// Checks `params` against the shape and family before accepting them.
    pub fn fixed(
        params: GarchParams, shape: &GarchShape, innovation: Innovation,
    ) -> GarchResult<Self> {
        params.validate_for(shape, innovation)?;
        Ok(StartingValues::Fixed(params))
    }

    /// Resolves the starting parameters for a given sample.
    pub fn resolve(
        &self, data: &GarchData, shape: &GarchShape, innovation: Innovation,
    ) -> GarchResult<GarchParams> {
        match self {
            StartingValues::Fixed(params) => {
                params.validate_for(shape, innovation)?;
                Ok(params.clone())
            }
            StartingValues::Heuristic => {
                let (p, q) = (shape.p, shape.q);
                let alpha_total =
                    if q == 0 { HEURISTIC_ARCH_ONLY_TOTAL } else { HEURISTIC_ALPHA_TOTAL };
                let beta_total = if q == 0 { 0.0 } else { HEURISTIC_BETA_TOTAL };
                let alpha = Array1::from_elem(p, alpha_total / p as f64);
                let beta = Array1::from_elem(q, if q == 0 { 0.0 } else { beta_total / q as f64 });
                let omega = data.sample_var() * (1.0 - alpha_total - beta_total);
                let (nu, lambda) = match innovation {
                    Innovation::Normal => (None, None),
                    Innovation::StudentT => (Some(HEURISTIC_NU), None),
                    Innovation::SkewStudentT => (Some(HEURISTIC_NU), Some(0.0)),
                };
                Ok(GarchParams::new(data.sample_mean(), omega, alpha, beta, nu, lambda)?)
            }
        }
    }
}
