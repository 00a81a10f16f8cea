//! Innovation families for standardized GARCH shocks `z_t = ε_t / σ_t`.
//!
//! Every family is standardized to mean 0 and variance 1, so `σ²_t` is the
//! conditional variance of the return regardless of the family. The family
//! fixes how many shape parameters the optimizer carries:
//!
//! | family          | shape parameters |
//! |-----------------|------------------|
//! | `Normal`        | none             |
//! | `StudentT`      | ν                |
//! | `SkewStudentT`  | ν, λ             |
use crate::volatility::{
    core::skew_t::{SkewT, SkewTScore},
    errors::{ParamError, ParamResult},
};
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Innovation {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "student-t")]
    StudentT,
    #[default]
    #[serde(rename = "skew-t")]
    SkewStudentT,
}

impl Innovation {
    /// Number of shape parameters appended to θ.
    pub const fn n_shape(&self) -> usize {
        match self {
            Innovation::Normal => 0,
            Innovation::StudentT => 1,
            Innovation::SkewStudentT => 2,
        }
    }

    pub const fn shape_names(&self) -> &'static [&'static str] {
        match self {
            Innovation::Normal => &[],
            Innovation::StudentT => &["nu"],
            Innovation::SkewStudentT => &["nu", "lambda"],
        }
    }

    /// Checks that exactly the shape parameters of this family are present.
    pub fn validate_shape(&self, nu: Option<f64>, lambda: Option<f64>) -> ParamResult<()> {
        let supplied = nu.is_some() as usize + lambda.is_some() as usize;
        let consistent = match self {
            Innovation::Normal => nu.is_none() && lambda.is_none(),
            Innovation::StudentT => nu.is_some() && lambda.is_none(),
            Innovation::SkewStudentT => nu.is_some() && lambda.is_some(),
        };
        if !consistent {
            return Err(ParamError::ShapeParameterMismatch {
                expected: self.n_shape(),
                actual: supplied,
            });
        }
        Ok(())
    }

    /// Builds the density for the given shape parameters.
    pub fn density(&self, nu: Option<f64>, lambda: Option<f64>) -> ParamResult<InnovationDensity> {
        self.validate_shape(nu, lambda)?;
        match (self, nu, lambda) {
            (Innovation::StudentT, Some(nu), _) => {
                Ok(InnovationDensity::StudentT(SkewT::new(nu, 0.0)?))
            }
            (Innovation::SkewStudentT, Some(nu), Some(lambda)) => {
                Ok(InnovationDensity::SkewT(SkewT::new(nu, lambda)?))
            }
            _ => Ok(InnovationDensity::Normal),
        }
    }
}

impl FromStr for Innovation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "normal" | "gaussian" => Ok(Innovation::Normal),
            "t" | "studentt" => Ok(Innovation::StudentT),
            "skewt" | "skewstudent" | "skewstudentt" => Ok(Innovation::SkewStudentT),
            _ => Err(format!("unknown innovation family '{s}' (normal | student-t | skew-t)")),
        }
    }
}

impl std::fmt::Display for Innovation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Innovation::Normal => "normal",
            Innovation::StudentT => "student-t",
            Innovation::SkewStudentT => "skew-t",
        };
        f.write_str(name)
    }
}

/// An innovation family with its shape parameters bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InnovationDensity {
    Normal,
    StudentT(SkewT),
    SkewT(SkewT),
}

impl InnovationDensity {
    pub fn log_density(&self, z: f64) -> f64 {
        match self {
            InnovationDensity::Normal => -0.5 * (2.0 * PI).ln() - 0.5 * z * z,
            InnovationDensity::StudentT(d) | InnovationDensity::SkewT(d) => d.log_density(z),
        }
    }

    /// Score in `z` and the shape parameters. Derivatives for parameters the
    /// family does not carry are reported as zero.
    pub fn score(&self, z: f64) -> SkewTScore {
        match self {
            InnovationDensity::Normal => SkewTScore {
                log_density: self.log_density(z),
                d_z: -z,
                d_nu: 0.0,
                d_lambda: 0.0,
            },
            InnovationDensity::StudentT(d) => SkewTScore { d_lambda: 0.0, ..d.score(z) },
            InnovationDensity::SkewT(d) => d.score(z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing, display and serde names of the families.
    // - Shape-parameter bookkeeping per family.
    // - The Normal log-density and score.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check name parsing and round-tripping through `Display`.
    //
    // Given
    // -----
    // - "skewt", "Student_T", "gaussian" and "laplace".
    //
    // Expect
    // ------
    // - The first three parse; the last fails; `Display` output re-parses.
    fn from_str_accepts_common_names() {
        // Act & Assert
        assert_eq!("skewt".parse::<Innovation>(), Ok(Innovation::SkewStudentT));
        assert_eq!("Student_T".parse::<Innovation>(), Ok(Innovation::StudentT));
        assert_eq!("gaussian".parse::<Innovation>(), Ok(Innovation::Normal));
        assert!("laplace".parse::<Innovation>().is_err());
        for fam in [Innovation::Normal, Innovation::StudentT, Innovation::SkewStudentT] {
            assert_eq!(fam.to_string().parse::<Innovation>(), Ok(fam));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify serde uses the same names as `Display`.
    //
    // Given
    // -----
    // - `Innovation::SkewStudentT` and the JSON string "\"student-t\"".
    //
    // Expect
    // ------
    // - Serializes to "\"skew-t\"" and deserializes to `StudentT`.
    fn serde_names_match_display() {
        // Act
        let json = serde_json::to_string(&Innovation::SkewStudentT).expect("serializable");
        let back: Innovation = serde_json::from_str("\"student-t\"").expect("known name");

        // Assert
        assert_eq!(json, "\"skew-t\"");
        assert_eq!(back, Innovation::StudentT);
    }

    #[test]
    // Purpose
    // -------
    // Ensure each family accepts exactly its own shape parameters.
    //
    // Given
    // -----
    // - Normal with ν, Student-t with (ν, λ), skew-t with (ν, λ).
    //
    // Expect
    // ------
    // - Mismatches fail with `ShapeParameterMismatch`; the skew-t case builds.
    fn density_requires_matching_shape_parameters() {
        // Act & Assert
        assert_eq!(
            Innovation::Normal.density(Some(5.0), None),
            Err(ParamError::ShapeParameterMismatch { expected: 0, actual: 1 })
        );
        assert_eq!(
            Innovation::StudentT.density(Some(5.0), Some(0.1)),
            Err(ParamError::ShapeParameterMismatch { expected: 1, actual: 2 })
        );
        assert!(matches!(
            Innovation::SkewStudentT.density(Some(5.0), Some(0.1)),
            Ok(InnovationDensity::SkewT(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check the standard normal log-density and score.
    //
    // Given
    // -----
    // - z = 1.5.
    //
    // Expect
    // ------
    // - `ln φ(1.5)` and `d_z = −1.5` with zero shape derivatives.
    fn normal_score_is_minus_z() {
        // Arrange
        let dens = Innovation::Normal.density(None, None).expect("no shape parameters");

        // Act
        let s = dens.score(1.5);

        // Assert
        assert_relative_eq!(s.log_density, -0.5 * (2.0 * PI).ln() - 1.125, epsilon = 1e-14);
        assert_eq!(s.d_z, -1.5);
        assert_eq!((s.d_nu, s.d_lambda), (0.0, 0.0));
    }
}
