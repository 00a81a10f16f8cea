//! Full model configuration: order, innovation family and estimation options.
use crate::volatility::core::{
    innovations::Innovation, options::GarchOptions, shape::GarchShape, validation::theta_len,
};

/// Fixed at configuration time; a fit never mutates it.
///
/// The mean model is a constant `μ`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSpec {
    pub shape: GarchShape,
    pub innovation: Innovation,
    pub options: GarchOptions,
}

impl ModelSpec {
    pub fn new(shape: GarchShape, innovation: Innovation, options: GarchOptions) -> ModelSpec {
        ModelSpec { shape, innovation, options }
    }

    /// Number of estimated parameters.
    pub fn n_params(&self) -> usize {
        theta_len(&self.shape, self.innovation)
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Constant mean - {} - {} innovations", self.shape, self.innovation)
    }
}
