//! Bilinear shape functions of the square element [-h, h]².
//!
//! # Node Numbering
//!
//! Counter-clockwise starting at the top-right corner:
//!
//! ```text
//! 2 --- 1      N1 = (h + x)(h + y) / 4h²
//! |     |      N2 = (h - x)(h + y) / 4h²
//! 3 --- 4      N3 = (h - x)(h - y) / 4h²
//!              N4 = (h + x)(h - y) / 4h²
//! ```
//!
//! Node 1: (+h, +h), Node 2: (-h, +h), Node 3: (-h, -h), Node 4: (+h, -h)

use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use crate::types::ShapeVector;

/// Corner signs (sx, sy) so that node i sits at (sx·h, sy·h).
pub const NODE_SIGNS: [(f64, f64); 4] = [
    (1.0, 1.0),   // Node 1
    (-1.0, 1.0),  // Node 2
    (-1.0, -1.0), // Node 3
    (1.0, -1.0),  // Node 4
];

/// Reject half-widths that leave the shape functions undefined.
pub fn validate_half_width(half_width: f64) -> Result<()> {
    if !half_width.is_finite() || half_width <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "half-width must be positive, got {half_width}"
        )));
    }
    Ok(())
}

/// Physical nodal coordinates for half-width `h`.
pub fn node_coordinates(half_width: f64) -> Result<[(f64, f64); 4]> {
    validate_half_width(half_width)?;
    Ok(NODE_SIGNS.map(|(sx, sy)| (sx * half_width, sy * half_width)))
}

/// Evaluate the four shape functions at `(x, y)`.
pub fn shape_functions(x: f64, y: f64, half_width: f64) -> Result<ShapeVector> {
    validate_half_width(half_width)?;
    let h = half_width;
    let denom = 4.0 * h * h;
    Ok(ShapeVector::from_fn(|i, _| {
        let (sx, sy) = NODE_SIGNS[i];
        (h + sx * x) * (h + sy * y) / denom
    }))
}

/// Analytic shape function derivatives at `(x, y)`.
///
/// Returns (∂N/∂x, ∂N/∂y) for each node:
/// ∂Nᵢ/∂x = sxᵢ (h + syᵢ y) / 4h², ∂Nᵢ/∂y = syᵢ (h + sxᵢ x) / 4h².
pub fn shape_function_derivatives(x: f64, y: f64, half_width: f64) -> Result<[(f64, f64); 4]> {
    validate_half_width(half_width)?;
    Ok(derivatives(x, y, half_width))
}

/// Same as [`shape_function_derivatives`] for an already validated `h`.
pub(crate) fn derivatives(x: f64, y: f64, h: f64) -> [(f64, f64); 4] {
    let denom = 4.0 * h * h;
    NODE_SIGNS.map(|(sx, sy)| (sx * (h + sy * y) / denom, sy * (h + sx * x) / denom))
}

/// The shape functions as closed-form polynomials in (x, y).
pub fn shape_polynomials(half_width: f64) -> Result<[Polynomial; 4]> {
    validate_half_width(half_width)?;
    let h = Polynomial::constant(half_width);
    let scale = 1.0 / (4.0 * half_width * half_width);
    Ok(NODE_SIGNS.map(|(sx, sy)| {
        let along_x = &h + &Polynomial::x().scale(sx);
        let along_y = &h + &Polynomial::y().scale(sy);
        (along_x * along_y).scale(scale)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLES: [(f64, f64); 5] = [(0.0, 0.0), (0.3, -0.7), (-1.0, 1.0), (0.99, 0.01), (-0.5, -0.25)];

    #[test]
    fn test_partition_of_unity() {
        for &h in &[0.5, 1.0, 3.0] {
            for &(sx, sy) in &SAMPLES {
                let n = shape_functions(sx * h, sy * h, h).unwrap();
                assert_relative_eq!(n.sum(), 1.0, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_kronecker_delta_at_nodes() {
        let h = 2.0;
        let nodes = node_coordinates(h).unwrap();
        for (i, &(x, y)) in nodes.iter().enumerate() {
            let n = shape_functions(x, y, h).unwrap();
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(n[j], expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_first_node_is_top_right() {
        assert_eq!(node_coordinates(1.0).unwrap()[0], (1.0, 1.0));
        assert_eq!(node_coordinates(1.0).unwrap()[2], (-1.0, -1.0));
    }

    #[test]
    fn test_centroid_values() {
        let n = shape_functions(0.0, 0.0, 1.0).unwrap();
        for i in 0..4 {
            assert_relative_eq!(n[i], 0.25, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_derivatives_sum_to_zero() {
        for &(x, y) in &SAMPLES {
            let d = shape_function_derivatives(x, y, 1.0).unwrap();
            let sum_x: f64 = d.iter().map(|v| v.0).sum();
            let sum_y: f64 = d.iter().map(|v| v.1).sum();
            assert_relative_eq!(sum_x, 0.0, epsilon = 1e-14);
            assert_relative_eq!(sum_y, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_polynomials_match_evaluator() {
        let h = 1.5;
        let polys = shape_polynomials(h).unwrap();
        for &(x, y) in &SAMPLES {
            let n = shape_functions(x, y, h).unwrap();
            for i in 0..4 {
                assert_relative_eq!(polys[i].evaluate(x, y), n[i], epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_polynomial_derivatives_match_analytic() {
        let h = 0.75;
        let polys = shape_polynomials(h).unwrap();
        for &(x, y) in &SAMPLES {
            let analytic = shape_function_derivatives(x, y, h).unwrap();
            for i in 0..4 {
                assert_relative_eq!(polys[i].derivative_x().evaluate(x, y), analytic[i].0, epsilon = 1e-14);
                assert_relative_eq!(polys[i].derivative_y().evaluate(x, y), analytic[i].1, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_invalid_half_width() {
        assert!(matches!(shape_functions(0.0, 0.0, 0.0), Err(Error::InvalidGeometry(_))));
        assert!(shape_functions(0.0, 0.0, -1.0).is_err());
        assert!(shape_function_derivatives(0.0, 0.0, f64::NAN).is_err());
        assert!(shape_polynomials(0.0).is_err());
        assert!(node_coordinates(-2.0).is_err());
    }
}
