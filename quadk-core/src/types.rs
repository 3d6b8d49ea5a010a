//! Core data types for the plane stress element.
//!
//! This module defines the fixed-size matrices that flow through the pipeline
//! and the in-plane stress and strain vectors:
//! - Shape function values and nodal displacement vectors
//! - Strain-displacement, constitutive and stiffness matrices
//! - Plane stress and strain in Voigt notation

use nalgebra::{Matrix3, SMatrix, SVector, Vector3, Vector4};

/// Values of the four shape functions at a point.
pub type ShapeVector = Vector4<f64>;

/// Strain-displacement operator B, mapping 8 nodal DOFs to 3 strains.
pub type StrainDisplacement = SMatrix<f64, 3, 8>;

/// Plane stress constitutive matrix C.
///
/// Maps strain vector to stress vector: σ = C * ε
pub type ConstitutiveMatrix = Matrix3<f64>;

/// Element stiffness matrix K.
pub type StiffnessMatrix = SMatrix<f64, 8, 8>;

/// Nodal displacements interleaved as (u1, v1, u2, v2, u3, v3, u4, v4).
pub type DisplacementVector = SVector<f64, 8>;

/// In-plane stress in Voigt notation.
///
/// Components are ordered as: [σ_xx, σ_yy, τ_xy]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressVector(pub Vector3<f64>);

impl StressVector {
    /// Create a new stress vector from Voigt components.
    pub fn new(components: [f64; 3]) -> Self {
        Self(Vector3::from_row_slice(&components))
    }

    /// Von Mises equivalent stress under plane stress (σ_zz = 0).
    pub fn von_mises(&self) -> f64 {
        let s_xx = self.0[0];
        let s_yy = self.0[1];
        let t_xy = self.0[2];
        (s_xx * s_xx - s_xx * s_yy + s_yy * s_yy + 3.0 * t_xy * t_xy).sqrt()
    }

    /// Principal stresses (σ_1 ≥ σ_2) in the plane.
    pub fn principal(&self) -> (f64, f64) {
        let center = 0.5 * (self.0[0] + self.0[1]);
        let radius = (0.25 * (self.0[0] - self.0[1]).powi(2) + self.0[2].powi(2)).sqrt();
        (center + radius, center - radius)
    }
}

/// In-plane strain in Voigt notation.
///
/// Components are ordered as: [ε_xx, ε_yy, γ_xy]
/// where γ = 2ε for engineering shear strain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainVector(pub Vector3<f64>);

impl StrainVector {
    /// Create a new strain vector from Voigt components.
    pub fn new(components: [f64; 3]) -> Self {
        Self(Vector3::from_row_slice(&components))
    }

    /// In-plane area change ε_xx + ε_yy.
    pub fn areal(&self) -> f64 {
        self.0[0] + self.0[1]
    }
}
