//! 4-node square plane stress element.
//!
//! A 2D element with:
//! - 4 nodes at the corners of [-h, h]²
//! - 2 DOFs per node (u, v displacements), interleaved (u1, v1, ..., u4, v4)
//! - 8 total DOFs
//! - Bilinear shape functions (see [`shape`](super::shape))
//!
//! # Integration
//!
//! The stiffness K = t ∫∫ Bᵗ C B dx dy can be evaluated two ways:
//!
//! - [`Integration::ClosedForm`]: B is built by differentiating the shape
//!   polynomials, every entry of Bᵗ C B is multiplied out as a polynomial and
//!   integrated exactly over the square.
//! - [`Integration::Gauss`]: n×n Gauss-Legendre quadrature. The integrand is
//!   biquadratic, so n ≥ 2 reproduces the closed form to round-off.
//!
//! # Plane Stress Assumption
//!
//! σ_zz = τ_yz = τ_xz = 0; the element is thin in z with thickness t.

use crate::element::gauss::gauss_quad;
use crate::element::shape::{self, validate_half_width};
use crate::error::{Error, Result};
use crate::material::Material;
use crate::polynomial::Polynomial;
use crate::types::{
    ConstitutiveMatrix, DisplacementVector, StiffnessMatrix, StrainDisplacement, StrainVector,
    StressVector,
};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used to evaluate the stiffness integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integration {
    /// Exact polynomial integration.
    #[default]
    ClosedForm,
    /// n×n Gauss-Legendre quadrature, n in 2..=4.
    Gauss(usize),
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integration::ClosedForm => write!(f, "closed-form"),
            Integration::Gauss(n) => write!(f, "gauss {n}x{n}"),
        }
    }
}

/// Strain-displacement operator at `(x, y)` for the square of half-width `h`.
///
/// For node i the column pair (2i, 2i+1) holds
///
/// ```text
/// [ ∂Nᵢ/∂x   0      ]
/// [ 0        ∂Nᵢ/∂y ]
/// [ ∂Nᵢ/∂y   ∂Nᵢ/∂x ]
/// ```
pub fn strain_displacement(x: f64, y: f64, half_width: f64) -> Result<StrainDisplacement> {
    let dn = shape::shape_function_derivatives(x, y, half_width)?;
    Ok(assemble_b(&dn))
}

fn assemble_b(dn: &[(f64, f64); 4]) -> StrainDisplacement {
    let mut b = StrainDisplacement::zeros();
    for (i, &(dn_dx, dn_dy)) in dn.iter().enumerate() {
        let col = 2 * i;
        b[(0, col)] = dn_dx; // ε_xx = ∂u/∂x
        b[(1, col + 1)] = dn_dy; // ε_yy = ∂v/∂y
        b[(2, col)] = dn_dy; // γ_xy = ∂u/∂y + ∂v/∂x
        b[(2, col + 1)] = dn_dx;
    }
    b
}

/// The strain-displacement operator as a 3×8 grid of polynomials in (x, y).
///
/// Built by differentiating [`shape::shape_polynomials`].
pub fn strain_displacement_polynomials(half_width: f64) -> Result<Vec<Vec<Polynomial>>> {
    let n = shape::shape_polynomials(half_width)?;

    let mut b = vec![vec![Polynomial::zero(); 8]; 3];
    for (i, n_i) in n.iter().enumerate() {
        let col = 2 * i;
        let dn_dx = n_i.derivative_x();
        let dn_dy = n_i.derivative_y();
        b[0][col] = dn_dx.clone();
        b[1][col + 1] = dn_dy.clone();
        b[2][col] = dn_dy;
        b[2][col + 1] = dn_dx;
    }
    Ok(b)
}

/// Bilinear square plane stress element on [-h, h]².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad4PlaneStress {
    /// Half of the side length.
    half_width: f64,
    /// Out-of-plane thickness.
    thickness: f64,
}

impl Quad4PlaneStress {
    /// Number of nodes.
    pub const N_NODES: usize = 4;
    /// Degrees of freedom per node.
    pub const DOFS_PER_NODE: usize = 2;
    /// Total degrees of freedom.
    pub const N_DOFS: usize = Self::N_NODES * Self::DOFS_PER_NODE;

    /// Create a new element of unit thickness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if `half_width` is not positive.
    pub fn new(half_width: f64) -> Result<Self> {
        validate_half_width(half_width)?;
        Ok(Self {
            half_width,
            thickness: 1.0,
        })
    }

    /// Set the out-of-plane thickness.
    pub fn with_thickness(mut self, thickness: f64) -> Result<Self> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "thickness must be positive, got {thickness}"
            )));
        }
        self.thickness = thickness;
        Ok(self)
    }

    /// Half of the side length.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Out-of-plane thickness.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// In-plane area 4h².
    pub fn area(&self) -> f64 {
        4.0 * self.half_width * self.half_width
    }

    /// Element volume, area times thickness.
    pub fn volume(&self) -> f64 {
        self.area() * self.thickness
    }

    /// Strain-displacement operator at a physical point.
    pub fn b_matrix(&self, x: f64, y: f64) -> StrainDisplacement {
        // half_width was validated on construction
        assemble_b(&shape::derivatives(x, y, self.half_width))
    }

    /// Compute the element stiffness matrix with the given strategy.
    pub fn stiffness(&self, material: &Material, integration: Integration) -> Result<StiffnessMatrix> {
        let c = material.constitutive_plane_stress();
        debug!(
            "Quad4 stiffness: h = {}, t = {}, E = {}, nu = {}, {:?}",
            self.half_width, self.thickness, material.youngs_modulus, material.poissons_ratio, integration
        );

        let k = match integration {
            Integration::ClosedForm => self.stiffness_closed_form(&c)?,
            Integration::Gauss(n) => self.stiffness_gauss(&c, n)?,
        };

        if let Some(bad) = k.iter().find(|v| !v.is_finite()) {
            return Err(Error::IntegrationFailure(format!(
                "stiffness contains non-finite entry {bad}"
            )));
        }
        Ok(k)
    }

    /// Exact integration of Bᵗ C B entry by entry.
    fn stiffness_closed_form(&self, c: &ConstitutiveMatrix) -> Result<StiffnessMatrix> {
        let h = self.half_width;
        let b = strain_displacement_polynomials(h)?;

        // C B as polynomials (3x8)
        let cb: Vec<Vec<Polynomial>> = (0..3)
            .map(|r| {
                (0..8)
                    .map(|col| {
                        (0..3).fold(Polynomial::zero(), |acc, s| &acc + &b[s][col].scale(c[(r, s)]))
                    })
                    .collect()
            })
            .collect();

        // Upper triangle entries are independent
        let pairs: Vec<(usize, usize)> = (0..8).flat_map(|a| (a..8).map(move |bb| (a, bb))).collect();
        let entries: Vec<(usize, usize, f64)> = pairs
            .par_iter()
            .map(|&(a, col)| {
                let integrand = (0..3).fold(Polynomial::zero(), |acc, r| &acc + &(&b[r][a] * &cb[r][col]));
                trace!("K[{a},{col}] integrand degree ({}, {})", integrand.degree_x(), integrand.degree_y());
                (a, col, integrand.integrate_square(h) * self.thickness)
            })
            .collect();

        let mut k = StiffnessMatrix::zeros();
        for (a, col, value) in entries {
            k[(a, col)] = value;
            k[(col, a)] = value;
        }
        Ok(k)
    }

    /// n×n Gauss-Legendre quadrature mapped to [-h, h]².
    fn stiffness_gauss(&self, c: &ConstitutiveMatrix, n: usize) -> Result<StiffnessMatrix> {
        if !(2..=4).contains(&n) {
            return Err(Error::IntegrationFailure(format!(
                "Gauss rule needs 2 to 4 points per direction, got {n}"
            )));
        }

        let h = self.half_width;
        // x = h ξ, y = h η
        let det_j = h * h;
        let mut k = StiffnessMatrix::zeros();
        for gp in gauss_quad(n)? {
            let b = self.b_matrix(h * gp.xi(), h * gp.eta());
            // K += w * t * det(J) * B^T * C * B
            k += b.transpose() * c * b * (gp.weight * self.thickness * det_j);
        }
        Ok(k)
    }

    /// Strain at a physical point for the given nodal displacements.
    pub fn strain_at(&self, x: f64, y: f64, displacements: &[f64]) -> Result<StrainVector> {
        let u = Self::displacement_vector(displacements)?;
        Ok(StrainVector(self.b_matrix(x, y) * u))
    }

    /// Stress at a physical point for the given nodal displacements.
    pub fn stress_at(
        &self,
        x: f64,
        y: f64,
        displacements: &[f64],
        material: &Material,
    ) -> Result<StressVector> {
        let strain = self.strain_at(x, y, displacements)?;
        Ok(StressVector(material.constitutive_plane_stress() * strain.0))
    }

    /// Stresses at the 2×2 Gauss points.
    ///
    /// Points are returned in the order of [`gauss_quad`].
    pub fn stress(&self, displacements: &[f64], material: &Material) -> Result<Vec<StressVector>> {
        let u = Self::displacement_vector(displacements)?;
        let c = material.constitutive_plane_stress();
        let h = self.half_width;

        let stresses: Vec<StressVector> = gauss_quad(2)?
            .iter()
            .map(|gp| StressVector(c * (self.b_matrix(h * gp.xi(), h * gp.eta()) * u)))
            .collect();
        Ok(stresses)
    }

    fn displacement_vector(displacements: &[f64]) -> Result<DisplacementVector> {
        if displacements.len() != Self::N_DOFS {
            return Err(Error::Element(format!(
                "Quad4 requires {} displacement DOFs, got {}",
                Self::N_DOFS,
                displacements.len()
            )));
        }
        Ok(DisplacementVector::from_column_slice(displacements))
    }
}

/// Full pipeline: validate inputs and integrate the unit-thickness stiffness in closed form.
pub fn element_stiffness(youngs_modulus: f64, poissons_ratio: f64, half_width: f64) -> Result<StiffnessMatrix> {
    let material = Material::new(youngs_modulus, poissons_ratio)?;
    Quad4PlaneStress::new(half_width)?.stiffness(&material, Integration::ClosedForm)
}
