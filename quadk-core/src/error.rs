//! Error types for stiffness evaluation.

use thiserror::Error;

/// Result type alias using the crate's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or evaluating the element.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-positive or non-finite half-width or thickness.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Young's modulus or Poisson's ratio outside the physical range.
    #[error("invalid material parameters: {0}")]
    InvalidMaterialParameters(String),

    /// Unsupported quadrature order or a non-finite integral.
    #[error("integration failure: {0}")]
    IntegrationFailure(String),

    /// Element-level misuse, e.g. a displacement vector of the wrong length.
    #[error("element error: {0}")]
    Element(String),

    /// Malformed configuration document.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O errors (reading config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
