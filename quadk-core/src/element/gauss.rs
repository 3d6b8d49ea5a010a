//! Gauss-Legendre quadrature rules.
//!
//! This module provides the rules used by the numerical integration strategy:
//! - 1D line integration on [-1, 1]
//! - Quadrilateral integration on [-1, 1]² (tensor product)
//!
//! # Usage
//!
//! ```
//! use quadk_core::element::gauss::{gauss_1d, gauss_quad};
//!
//! // 2-point 1D rule
//! for (xi, w) in gauss_1d(2).unwrap() {
//!     // integrate at point xi with weight w
//! }
//!
//! // 2x2 quadrilateral rule
//! for gp in gauss_quad(2).unwrap() {
//!     // gp.xi(), gp.eta() are natural coordinates, gp.weight the weight
//! }
//! ```

use crate::error::{Error, Result};

/// A Gauss quadrature point with natural coordinates and weight.
#[derive(Debug, Clone, Copy)]
pub struct GaussPoint {
    /// Natural coordinates [ξ, η] in [-1, 1]².
    pub coords: [f64; 2],
    /// Integration weight.
    pub weight: f64,
}

impl GaussPoint {
    /// Create a new Gauss point.
    pub fn new(coords: [f64; 2], weight: f64) -> Self {
        Self { coords, weight }
    }

    /// Get ξ (first natural coordinate).
    #[inline]
    pub fn xi(&self) -> f64 {
        self.coords[0]
    }

    /// Get η (second natural coordinate).
    #[inline]
    pub fn eta(&self) -> f64 {
        self.coords[1]
    }
}

/// 1D Gauss-Legendre quadrature points and weights.
///
/// Returns (point, weight) pairs for integration on [-1, 1]. An n-point rule
/// is exact for polynomials up to degree 2n - 1.
///
/// # Errors
///
/// Returns [`Error::IntegrationFailure`] if `n` is not in 1..=4.
pub fn gauss_1d(n: usize) -> Result<Vec<(f64, f64)>> {
    let rule = match n {
        1 => vec![(0.0, 2.0)],
        2 => {
            let p = 1.0 / 3.0_f64.sqrt();
            vec![(-p, 1.0), (p, 1.0)]
        }
        3 => {
            let p = (3.0 / 5.0_f64).sqrt();
            vec![(-p, 5.0 / 9.0), (0.0, 8.0 / 9.0), (p, 5.0 / 9.0)]
        }
        4 => {
            // Points: ±√((3 ∓ 2√(6/5))/7)
            let sqrt_6_5 = (6.0 / 5.0_f64).sqrt();
            let p1 = ((3.0 - 2.0 * sqrt_6_5) / 7.0).sqrt();
            let p2 = ((3.0 + 2.0 * sqrt_6_5) / 7.0).sqrt();
            // Weights: (18 ± √30) / 36
            let sqrt_30 = 30.0_f64.sqrt();
            let w1 = (18.0 + sqrt_30) / 36.0;
            let w2 = (18.0 - sqrt_30) / 36.0;
            vec![(-p2, w2), (-p1, w1), (p1, w1), (p2, w2)]
        }
        _ => {
            return Err(Error::IntegrationFailure(format!(
                "gauss_1d: n must be 1, 2, 3, or 4, got {n}"
            )))
        }
    };
    Ok(rule)
}

/// Quadrilateral Gauss quadrature points.
///
/// Returns integration points for a reference quadrilateral with ξ, η ∈ [-1, 1],
/// built as the tensor product of 1D Gauss-Legendre rules.
///
/// # Arguments
///
/// * `n` - Number of points per direction (1 to 4)
///
/// Returns n² total integration points.
pub fn gauss_quad(n: usize) -> Result<Vec<GaussPoint>> {
    let rule_1d = gauss_1d(n)?;
    let mut points = Vec::with_capacity(n * n);

    for &(xi, w_xi) in &rule_1d {
        for &(eta, w_eta) in &rule_1d {
            points.push(GaussPoint::new([xi, eta], w_xi * w_eta));
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gauss_1d_integrates_polynomials() {
        // 1-point rule integrates constants exactly
        // ∫_{-1}^{1} 3 dx = 6
        let rule = gauss_1d(1).unwrap();
        let integral: f64 = rule.iter().map(|&(_, w)| 3.0 * w).sum();
        assert_relative_eq!(integral, 6.0, epsilon = 1e-14);

        // 2-point rule integrates x² exactly
        // ∫_{-1}^{1} x² dx = 2/3
        let rule = gauss_1d(2).unwrap();
        let integral: f64 = rule.iter().map(|&(x, w)| x.powi(2) * w).sum();
        assert_relative_eq!(integral, 2.0 / 3.0, epsilon = 1e-14);

        // 4-point rule integrates x⁶ exactly
        // ∫_{-1}^{1} x⁶ dx = 2/7
        let rule = gauss_1d(4).unwrap();
        let integral: f64 = rule.iter().map(|&(x, w)| x.powi(6) * w).sum();
        assert_relative_eq!(integral, 2.0 / 7.0, epsilon = 1e-13);
    }

    #[test]
    fn test_gauss_1d_weights_sum() {
        // Weights should sum to 2 (length of [-1, 1])
        for n in 1..=4 {
            let rule = gauss_1d(n).unwrap();
            let sum: f64 = rule.iter().map(|&(_, w)| w).sum();
            assert_relative_eq!(sum, 2.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_gauss_quad_point_count() {
        assert_eq!(gauss_quad(1).unwrap().len(), 1);
        assert_eq!(gauss_quad(2).unwrap().len(), 4);
        assert_eq!(gauss_quad(3).unwrap().len(), 9);
    }

    #[test]
    fn test_gauss_quad_weights_sum() {
        // Weights should sum to 4 (area of [-1,1]²)
        for n in 1..=4 {
            let rule = gauss_quad(n).unwrap();
            let sum: f64 = rule.iter().map(|gp| gp.weight).sum();
            assert_relative_eq!(sum, 4.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_gauss_quad_integrates_biquadratic() {
        // ∫∫ ξ²η² over [-1,1]² = 4/9
        let rule = gauss_quad(2).unwrap();
        let integral: f64 = rule
            .iter()
            .map(|gp| gp.xi().powi(2) * gp.eta().powi(2) * gp.weight)
            .sum();
        assert_relative_eq!(integral, 4.0 / 9.0, epsilon = 1e-14);
    }

    #[test]
    fn test_gauss_invalid_n() {
        assert!(matches!(gauss_1d(5), Err(Error::IntegrationFailure(_))));
        assert!(matches!(gauss_quad(0), Err(Error::IntegrationFailure(_))));
    }
}
