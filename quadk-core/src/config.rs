//! Evaluation parameters.
//!
//! Defaults reproduce the worked example ν = 1/3, E = 8/3, h = 1 with unit
//! thickness and closed-form integration. A JSON document may override any
//! subset of the fields:
//!
//! ```json
//! { "youngs_modulus": 210e9, "poissons_ratio": 0.3, "integration": { "gauss": 2 } }
//! ```

use crate::element::quad4::{Integration, Quad4PlaneStress};
use crate::error::Result;
use crate::material::Material;
use crate::report::DEFAULT_SIGNIFICANT_DIGITS;
use crate::types::StiffnessMatrix;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Material, geometry and integration settings for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Young's modulus E.
    pub youngs_modulus: f64,
    /// Poisson's ratio ν, in (-1, 0.5).
    pub poissons_ratio: f64,
    /// Half-width h of the square [-h, h]².
    pub half_width: f64,
    /// Out-of-plane thickness t.
    pub thickness: f64,
    /// How the stiffness integral is evaluated.
    pub integration: Integration,
    /// Significant digits in text output, clamped to 1..=17.
    pub significant_digits: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            youngs_modulus: 8.0 / 3.0,
            poissons_ratio: 1.0 / 3.0,
            half_width: 1.0,
            thickness: 1.0,
            integration: Integration::ClosedForm,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl EvaluationConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validated material.
    pub fn material(&self) -> Result<Material> {
        Material::new(self.youngs_modulus, self.poissons_ratio)
    }

    /// Validated element.
    pub fn element(&self) -> Result<Quad4PlaneStress> {
        Quad4PlaneStress::new(self.half_width)?.with_thickness(self.thickness)
    }

    /// Run the pipeline for these settings.
    pub fn evaluate(&self) -> Result<StiffnessMatrix> {
        let material = self.material()?;
        self.element()?.stiffness(&material, self.integration)
    }
}
