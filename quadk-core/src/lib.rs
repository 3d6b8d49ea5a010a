//! quadk core - closed-form stiffness of the bilinear plane stress square
//!
//! Derives the 8x8 stiffness matrix of a 4-node quadrilateral occupying
//! [-h, h]² under plane stress linear elasticity:
//! - Bilinear shape functions and their exact derivatives
//! - Strain-displacement operator B (3x8)
//! - Plane stress constitutive matrix C (3x3)
//! - K = t ∫∫ Bᵗ C B dx dy, integrated exactly or by Gauss quadrature
//!
//! # Architecture
//!
//! - [`polynomial`]: bivariate polynomials carrying the closed-form integrand
//! - [`element`]: shape functions, quadrature and the [`Quad4PlaneStress`] element
//! - [`Material`]: isotropic material and its plane stress matrix
//! - [`analysis`]: symmetry and eigenvalue checks
//! - [`EvaluationConfig`] / [`report`]: parameters in, formatted matrix out
//!
//! ```
//! use quadk_core::element_stiffness;
//!
//! let k = element_stiffness(8.0 / 3.0, 1.0 / 3.0, 1.0).unwrap();
//! assert!((k[(0, 0)] - 4.0 / 3.0).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod config;
pub mod element;
pub mod error;
pub mod material;
pub mod polynomial;
pub mod report;
pub mod types;

pub use analysis::{spectrum, Spectrum};
pub use config::EvaluationConfig;
pub use element::{element_stiffness, Integration, Quad4PlaneStress};
pub use error::{Error, Result};
pub use material::Material;
pub use report::StiffnessReport;
pub use types::{ConstitutiveMatrix, StiffnessMatrix, StrainDisplacement, StressVector, StrainVector};
