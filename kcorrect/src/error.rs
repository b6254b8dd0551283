//! Crate-wide error type

use thiserror::Error;

use crate::algo::interp::InterpError;
use crate::config::ConfigError;
use crate::cosmology::CosmologyError;

/// Errors surfaced by the public K-correction and distance API
#[derive(Debug, Error)]
pub enum KCorrectError {
    #[error("Invalid sample table: {0}")]
    InvalidInput(InterpError),

    #[error("Shape mismatch: {magnitudes} magnitudes but {redshifts} redshifts")]
    ShapeMismatch { magnitudes: usize, redshifts: usize },

    #[error("Value {value} is outside the table domain [{min}, {max}]")]
    Domain { value: f64, min: f64, max: f64 },

    #[error("Cosmology error: {0}")]
    Cosmology(#[from] CosmologyError),

    #[error("Degenerate frame integrals: {0}")]
    Degenerate(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<InterpError> for KCorrectError {
    fn from(err: InterpError) -> Self {
        match err {
            InterpError::OutOfBounds(value, min, max) => KCorrectError::Domain { value, min, max },
            other => KCorrectError::InvalidInput(other),
        }
    }
}
