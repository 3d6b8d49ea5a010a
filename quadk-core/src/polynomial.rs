//! Dense bivariate polynomials for closed-form integration.
//!
//! The shape functions of the bilinear square are polynomials in (x, y), so
//! are their derivatives and every entry of Bᵗ C B. Carrying them as
//! polynomials lets the stiffness integral be evaluated exactly from the
//! antiderivatives of monomials instead of by sampling.
//!
//! Coefficients are stored in a dense grid where entry `(i, j)` multiplies
//! `x^i y^j`.
//!
//! ```
//! use quadk_core::polynomial::Polynomial;
//!
//! // (1 + x)(1 + y) = 1 + x + y + xy
//! let p = (Polynomial::constant(1.0) + Polynomial::x()) * (Polynomial::constant(1.0) + Polynomial::y());
//! assert_eq!(p.coefficient(1, 1), 1.0);
//! assert_eq!(p.evaluate(1.0, 1.0), 4.0);
//! // ∫∫ over [-1, 1]² = 4
//! assert_eq!(p.integrate_square(1.0), 4.0);
//! ```

use nalgebra::DMatrix;
use std::ops::{Add, Mul, Neg, Sub};

/// Polynomial in two variables with real coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: DMatrix<f64>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// A constant polynomial.
    pub fn constant(value: f64) -> Self {
        Self {
            coeffs: DMatrix::from_element(1, 1, value),
        }
    }

    /// The monomial `x`.
    pub fn x() -> Self {
        let mut coeffs = DMatrix::zeros(2, 1);
        coeffs[(1, 0)] = 1.0;
        Self { coeffs }
    }

    /// The monomial `y`.
    pub fn y() -> Self {
        let mut coeffs = DMatrix::zeros(1, 2);
        coeffs[(0, 1)] = 1.0;
        Self { coeffs }
    }

    /// Build from a coefficient grid, `(i, j)` multiplying `x^i y^j`.
    ///
    /// An empty grid is the zero polynomial.
    pub fn from_coefficients(coeffs: DMatrix<f64>) -> Self {
        if coeffs.is_empty() {
            return Self::zero();
        }
        Self { coeffs }
    }

    /// Coefficient of `x^i y^j` (zero outside the stored grid).
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        if i < self.coeffs.nrows() && j < self.coeffs.ncols() {
            self.coeffs[(i, j)]
        } else {
            0.0
        }
    }

    /// Highest power of `x` with a non-zero coefficient.
    pub fn degree_x(&self) -> usize {
        (0..self.coeffs.nrows())
            .rev()
            .find(|&i| self.coeffs.row(i).iter().any(|&c| c != 0.0))
            .unwrap_or(0)
    }

    /// Highest power of `y` with a non-zero coefficient.
    pub fn degree_y(&self) -> usize {
        (0..self.coeffs.ncols())
            .rev()
            .find(|&j| self.coeffs.column(j).iter().any(|&c| c != 0.0))
            .unwrap_or(0)
    }

    /// True if every coefficient is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            coeffs: &self.coeffs * factor,
        }
    }

    /// Partial derivative with respect to `x`.
    pub fn derivative_x(&self) -> Self {
        let (rows, cols) = self.coeffs.shape();
        if rows == 1 {
            return Self::zero();
        }
        let coeffs = DMatrix::from_fn(rows - 1, cols, |i, j| (i + 1) as f64 * self.coeffs[(i + 1, j)]);
        Self { coeffs }
    }

    /// Partial derivative with respect to `y`.
    pub fn derivative_y(&self) -> Self {
        let (rows, cols) = self.coeffs.shape();
        if cols == 1 {
            return Self::zero();
        }
        let coeffs = DMatrix::from_fn(rows, cols - 1, |i, j| (j + 1) as f64 * self.coeffs[(i, j + 1)]);
        Self { coeffs }
    }

    /// Evaluate at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        // Horner in x over rows, each row Horner in y
        (0..self.coeffs.nrows()).rev().fold(0.0, |acc, i| {
            let row = (0..self.coeffs.ncols())
                .rev()
                .fold(0.0, |r, j| r * y + self.coeffs[(i, j)]);
            acc * x + row
        })
    }

    /// Exact integral over the rectangle `[x0, x1] × [y0, y1]`.
    pub fn integrate_rectangle(&self, (x0, x1): (f64, f64), (y0, y1): (f64, f64)) -> f64 {
        let mut total = 0.0;
        for i in 0..self.coeffs.nrows() {
            let ix = monomial_integral(i, x0, x1);
            for j in 0..self.coeffs.ncols() {
                let c = self.coeffs[(i, j)];
                if c != 0.0 {
                    total += c * ix * monomial_integral(j, y0, y1);
                }
            }
        }
        total
    }

    /// Exact integral over the square `[-h, h] × [-h, h]`.
    pub fn integrate_square(&self, half_width: f64) -> f64 {
        self.integrate_rectangle((-half_width, half_width), (-half_width, half_width))
    }
}

/// ∫ t^k dt over [a, b].
fn monomial_integral(k: usize, a: f64, b: f64) -> f64 {
    let p = (k + 1) as i32;
    (b.powi(p) - a.powi(p)) / p as f64
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let rows = self.coeffs.nrows().max(rhs.coeffs.nrows());
        let cols = self.coeffs.ncols().max(rhs.coeffs.ncols());
        let coeffs = DMatrix::from_fn(rows, cols, |i, j| self.coefficient(i, j) + rhs.coefficient(i, j));
        Polynomial { coeffs }
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let (ra, ca) = self.coeffs.shape();
        let (rb, cb) = rhs.coeffs.shape();
        let mut coeffs = DMatrix::zeros(ra + rb - 1, ca + cb - 1);
        for i in 0..ra {
            for j in 0..ca {
                let a = self.coeffs[(i, j)];
                if a == 0.0 {
                    continue;
                }
                for k in 0..rb {
                    for l in 0..cb {
                        coeffs[(i + k, j + l)] += a * rhs.coeffs[(k, l)];
                    }
                }
            }
        }
        Polynomial { coeffs }
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: f64) -> Polynomial {
        self.scale(rhs)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: f64) -> Polynomial {
        self.scale(rhs)
    }
}
