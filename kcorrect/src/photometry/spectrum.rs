//! Wavelength bands and analytic spectral curves
//!
//! This module provides the [`Band`] integration window and helpers that build
//! sample tables for simple analytic templates and response curves.

use serde::{Deserialize, Serialize};

use crate::algo::interp::{InterpError, SampleTable};

/// Lower edge of the DES r-band integration window in nanometers
pub const DES_R_BAND_LOWER_NM: f64 = 540.0;

/// Upper edge of the DES r-band integration window in nanometers
pub const DES_R_BAND_UPPER_NM: f64 = 730.0;

/// Offset used to build vertical edges in tabulated curves.
///
/// Small compared to any spectral feature, large enough to survive ULP rounding
/// at optical wavelengths.
const EDGE_OFFSET_NM: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower wavelength bound in nanometers
    pub lower_nm: f64,

    /// Upper wavelength bound in nanometers
    pub upper_nm: f64,
}

impl Band {
    /// Create a new Band directly from lower and upper bounds
    ///
    /// # Arguments
    ///
    /// * `lower_nm` - Lower wavelength bound in nanometers
    /// * `upper_nm` - Upper wavelength bound in nanometers
    ///
    /// # Returns
    ///
    /// A new Band with the specified wavelength bounds
    pub fn from_nm_bounds(lower_nm: f64, upper_nm: f64) -> Self {
        // These are programming errors, so we don't return Result
        // but panic if the range is invalid
        if !lower_nm.is_finite() || !upper_nm.is_finite() {
            panic!("Wavelength range cannot contain non-finite values");
        }

        if lower_nm > upper_nm {
            panic!(
                "Invalid wavelength range: start must be less than end, got {}..{}",
                lower_nm, upper_nm,
            );
        }
        if lower_nm < 0.0 || upper_nm < 0.0 {
            panic!("Wavelengths must be non-negative");
        }

        Self { lower_nm, upper_nm }
    }

    /// Approximate support of the DES r-band filter (540–730 nm)
    pub fn des_r() -> Self {
        Self::from_nm_bounds(DES_R_BAND_LOWER_NM, DES_R_BAND_UPPER_NM)
    }

    /// Get the width of the band in nanometers
    pub fn width(&self) -> f64 {
        self.upper_nm - self.lower_nm
    }

    /// Return the center of a band in nanometers
    pub fn center(&self) -> f64 {
        (self.lower_nm + self.upper_nm) / 2.0
    }

    /// Rest-frame span a template must cover so this band can be observed at
    /// every redshift in `redshifts` as well as at `z = 0`.
    ///
    /// The observed frame reads the template at `λ / (1 + z)`, so the lowest
    /// redshift sets the upper edge and the highest sets the lower edge.
    ///
    /// # Panics
    ///
    /// Panics if any redshift is at or below -1.
    pub fn rest_frame_coverage(&self, redshifts: &[f64]) -> Self {
        let min_z = redshifts.iter().copied().fold(0.0, f64::min);
        let max_z = redshifts.iter().copied().fold(0.0, f64::max);
        Self::from_nm_bounds(self.lower_nm / (1.0 + max_z), self.upper_nm / (1.0 + min_z))
    }
}

impl Default for Band {
    fn default() -> Self {
        Self::des_r()
    }
}

/// Tabulate a power-law spectrum `f(λ) = (λ / λ_c)^β` across a band.
///
/// # Arguments
///
/// * `beta` - Power-law slope in wavelength
/// * `band` - Wavelength range to sample; `λ_c` is its center
/// * `samples` - Number of evenly spaced samples (at least 2)
pub fn power_law_table(beta: f64, band: &Band, samples: usize) -> Result<SampleTable, InterpError> {
    if samples < 2 {
        return Err(InterpError::InsufficientData);
    }

    let step = band.width() / (samples - 1) as f64;
    let center = band.center();
    let mut wavelengths: Vec<f64> = (0..samples)
        .map(|i| band.lower_nm + step * i as f64)
        .collect();
    // Last sample lands exactly on the upper edge
    wavelengths[samples - 1] = band.upper_nm;
    let values = wavelengths
        .iter()
        .map(|&wavelength| (wavelength / center).powf(beta))
        .collect();

    SampleTable::from_columns(wavelengths, values)
}

/// Tabulate an idealized top-hat response with the given in-band efficiency.
///
/// The curve is zero just outside the band and rises vertically at each edge.
pub fn top_hat_response(band: &Band, efficiency: f64) -> Result<SampleTable, InterpError> {
    let wavelengths = vec![
        band.lower_nm - EDGE_OFFSET_NM,
        band.lower_nm,
        band.upper_nm,
        band.upper_nm + EDGE_OFFSET_NM,
    ];
    let efficiencies = vec![0.0, efficiency, efficiency, 0.0];

    SampleTable::from_columns(wavelengths, efficiencies)
}
