//! Type-safe physical units for cosmological distances
//!
//! This module provides strongly-typed lengths using the `uom` crate so
//! distances handed out by a cosmology cannot be confused between parsecs,
//! megaparsecs and SI meters.

use uom::si::length::parsec;

/// Type alias for length measurements with convenient methods
pub type Length = uom::si::f64::Length;

/// Parsecs per megaparsec
const PARSECS_PER_MEGAPARSEC: f64 = 1.0e6;

/// Extension trait for length conversions commonly used in astronomy
pub trait LengthExt {
    /// Get length in parsecs
    fn as_parsecs(&self) -> f64;

    /// Create length from megaparsecs (cosmological distances)
    fn from_megaparsecs(mpc: f64) -> Self;

    /// Get length in megaparsecs
    fn as_megaparsecs(&self) -> f64;
}

impl LengthExt for Length {
    fn as_parsecs(&self) -> f64 {
        self.get::<parsec>()
    }

    fn from_megaparsecs(mpc: f64) -> Self {
        Length::new::<parsec>(mpc * PARSECS_PER_MEGAPARSEC)
    }

    fn as_megaparsecs(&self) -> f64 {
        self.get::<parsec>() / PARSECS_PER_MEGAPARSEC
    }
}
