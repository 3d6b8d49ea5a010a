//! The bilinear square element.
//!
//! # Submodules
//!
//! - [`shape`] - Shape functions and their derivatives
//! - [`gauss`] - Gauss quadrature rules for numerical integration
//! - [`quad4`] - Strain-displacement operator and stiffness integration

pub mod gauss;
pub mod quad4;
pub mod shape;

pub use gauss::{gauss_1d, gauss_quad, GaussPoint};
pub use quad4::{
    element_stiffness, strain_displacement, strain_displacement_polynomials, Integration,
    Quad4PlaneStress,
};
pub use shape::{node_coordinates, shape_function_derivatives, shape_functions, shape_polynomials};
