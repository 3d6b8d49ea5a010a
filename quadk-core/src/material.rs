//! Material property definitions.
//!
//! Isotropic linear elastic materials under plane stress (σ_zz = 0).

use crate::error::{Error, Result};
use crate::types::ConstitutiveMatrix;
use log::trace;

/// Isotropic linear elastic material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Young's modulus E.
    pub youngs_modulus: f64,
    /// Poisson's ratio ν (dimensionless).
    pub poissons_ratio: f64,
}

impl Material {
    /// Create a new isotropic linear elastic material.
    ///
    /// # Arguments
    ///
    /// * `youngs_modulus` - Young's modulus E (> 0)
    /// * `poissons_ratio` - Poisson's ratio ν (dimensionless, -1 < ν < 0.5)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaterialParameters`] if the properties are
    /// physically invalid or not finite.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64) -> Result<Self> {
        if !youngs_modulus.is_finite() || youngs_modulus <= 0.0 {
            return Err(Error::InvalidMaterialParameters(format!(
                "Young's modulus must be positive, got {youngs_modulus}"
            )));
        }
        if !poissons_ratio.is_finite() || poissons_ratio <= -1.0 || poissons_ratio >= 0.5 {
            return Err(Error::InvalidMaterialParameters(format!(
                "Poisson's ratio must be in range (-1, 0.5), got {poissons_ratio}"
            )));
        }
        Ok(Self {
            youngs_modulus,
            poissons_ratio,
        })
    }

    /// Shear modulus G = E / (2(1 + ν)).
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }

    /// Plane stress constitutive matrix.
    ///
    /// Returns a 3x3 matrix for [σ_xx, σ_yy, τ_xy] = C * [ε_xx, ε_yy, γ_xy].
    /// With G = E / (1 - ν²):
    ///
    /// ```text
    /// [ G    νG   0          ]
    /// [ νG   G    0          ]
    /// [ 0    0    G(1 - ν)/2 ]
    /// ```
    pub fn constitutive_plane_stress(&self) -> ConstitutiveMatrix {
        let e = self.youngs_modulus;
        let nu = self.poissons_ratio;

        let factor = e / (1.0 - nu * nu);
        trace!("plane stress factor E/(1-nu^2) = {factor}");

        ConstitutiveMatrix::new(
            factor,         factor * nu, 0.0,
            factor * nu,    factor,      0.0,
            0.0,            0.0,         factor * (1.0 - nu) / 2.0,
        )
    }
}

/// Common material presets.
impl Material {
    /// Structural steel (E = 200 GPa, ν = 0.3).
    pub fn steel() -> Self {
        Self {
            youngs_modulus: 200e9,
            poissons_ratio: 0.3,
        }
    }

    /// Aluminum 6061-T6 (E = 68.9 GPa, ν = 0.33).
    pub fn aluminum() -> Self {
        Self {
            youngs_modulus: 68.9e9,
            poissons_ratio: 0.33,
        }
    }
}

/// Build the plane stress matrix directly from (ν, E).
///
/// Validates the parameters the same way as [`Material::new`].
pub fn plane_stress_matrix(poissons_ratio: f64, youngs_modulus: f64) -> Result<ConstitutiveMatrix> {
    Ok(Material::new(youngs_modulus, poissons_ratio)?.constitutive_plane_stress())
}
