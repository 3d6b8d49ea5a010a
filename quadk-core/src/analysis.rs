//! Spectral checks on an element stiffness matrix.
//!
//! An unconstrained 2D element must admit exactly three zero-energy modes:
//! translation in x, translation in y and in-plane rotation. Any additional
//! zero eigenvalue is a spurious (hourglass) mode; a negative one means the
//! matrix is not positive semidefinite.

use crate::element::shape::node_coordinates;
use crate::error::Result;
use crate::types::{DisplacementVector, StiffnessMatrix};
use log::debug;
use nalgebra::SymmetricEigen;

/// Relative threshold below which an eigenvalue counts as zero.
pub const ZERO_EIGENVALUE_TOLERANCE: f64 = 1e-10;

/// Eigenvalues of a stiffness matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Vec<f64>,
    /// Number of eigenvalues that are zero relative to the largest one.
    pub zero_modes: usize,
}

impl Spectrum {
    /// Largest eigenvalue.
    pub fn max(&self) -> f64 {
        self.eigenvalues.last().copied().unwrap_or(0.0)
    }

    /// True if no eigenvalue is negative beyond round-off.
    pub fn is_positive_semidefinite(&self) -> bool {
        let tol = ZERO_EIGENVALUE_TOLERANCE * self.max().abs();
        self.eigenvalues.iter().all(|&l| l >= -tol)
    }
}

/// True if |K_ij - K_ji| <= tolerance for every pair.
pub fn is_symmetric(k: &StiffnessMatrix, tolerance: f64) -> bool {
    (0..k.nrows()).all(|i| (i + 1..k.ncols()).all(|j| (k[(i, j)] - k[(j, i)]).abs() <= tolerance))
}

/// Eigen-decompose `k` and count its zero-energy modes.
pub fn spectrum(k: &StiffnessMatrix) -> Spectrum {
    let mut eigenvalues: Vec<f64> = SymmetricEigen::new(*k).eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.total_cmp(b));

    let scale = eigenvalues.iter().fold(0.0_f64, |m, l| m.max(l.abs()));
    let zero_modes = eigenvalues
        .iter()
        .filter(|l| l.abs() <= ZERO_EIGENVALUE_TOLERANCE * scale)
        .count();
    debug!("stiffness spectrum: {eigenvalues:?} ({zero_modes} zero modes)");

    Spectrum {
        eigenvalues,
        zero_modes,
    }
}

/// Rigid-body displacement fields: x translation, y translation, rotation about the centre.
pub fn rigid_body_modes(half_width: f64) -> Result<[DisplacementVector; 3]> {
    let nodes = node_coordinates(half_width)?;

    let mut translate_x = DisplacementVector::zeros();
    let mut translate_y = DisplacementVector::zeros();
    let mut rotate = DisplacementVector::zeros();
    for (i, &(x, y)) in nodes.iter().enumerate() {
        translate_x[2 * i] = 1.0;
        translate_y[2 * i + 1] = 1.0;
        // u = -θy, v = θx for a small rotation θ = 1
        rotate[2 * i] = -y;
        rotate[2 * i + 1] = x;
    }
    Ok([translate_x, translate_y, rotate])
}

/// Strain energy ½ uᵗ K u.
pub fn strain_energy(k: &StiffnessMatrix, displacements: &DisplacementVector) -> f64 {
    0.5 * displacements.dot(&(k * displacements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::quad4::element_stiffness;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_stiffness_is_symmetric() {
        let k = element_stiffness(8.0 / 3.0, 1.0 / 3.0, 1.0).unwrap();
        assert!(is_symmetric(&k, 1e-14));
    }

    #[test]
    fn test_asymmetric_matrix_detected() {
        let mut k = StiffnessMatrix::identity();
        k[(0, 7)] = 1e-3;
        assert!(!is_symmetric(&k, 1e-6));
        assert!(is_symmetric(&k, 1e-2));
    }

    #[test]
    fn test_three_zero_modes() {
        for &(e, nu, h) in &[(8.0 / 3.0, 1.0 / 3.0, 1.0), (1.0, 0.0, 1.0), (70e9, 0.33, 0.05)] {
            let s = spectrum(&element_stiffness(e, nu, h).unwrap());
            assert_eq!(s.eigenvalues.len(), 8);
            assert_eq!(s.zero_modes, 3, "eigenvalues: {:?}", s.eigenvalues);
            assert!(s.is_positive_semidefinite());
        }
    }

    #[test]
    fn test_eigenvalues_sorted() {
        let s = spectrum(&element_stiffness(8.0 / 3.0, 1.0 / 3.0, 1.0).unwrap());
        for pair in s.eigenvalues.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        // trace is preserved: 8 * 4/3
        let sum: f64 = s.eigenvalues.iter().sum();
        assert_relative_eq!(sum, 8.0 * 4.0 / 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_eigenvalue_not_psd() {
        let mut k = StiffnessMatrix::identity();
        k[(3, 3)] = -1.0;
        assert!(!spectrum(&k).is_positive_semidefinite());
    }

    #[test]
    fn test_rigid_body_modes_carry_no_force() {
        let h = 1.5;
        let k = element_stiffness(10.0, 0.25, h).unwrap();
        for mode in rigid_body_modes(h).unwrap() {
            assert_relative_eq!((k * mode).norm(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(strain_energy(&k, &mode), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_stretch_strain_energy() {
        // u = ε x on the unit-thickness square: U = ½ C₀₀ ε² · 4h²
        let h = 1.0;
        let k = element_stiffness(8.0 / 3.0, 1.0 / 3.0, h).unwrap();
        let eps = 0.01;
        let mut u = DisplacementVector::zeros();
        for (i, &(x, _)) in node_coordinates(h).unwrap().iter().enumerate() {
            u[2 * i] = eps * x;
        }
        assert_relative_eq!(strain_energy(&k, &u), 0.5 * 3.0 * eps * eps * 4.0, epsilon = 1e-12);
    }
}
