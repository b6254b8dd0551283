//! Flat Lambda-CDM background cosmology.

use serde::{Deserialize, Serialize};

use super::{Cosmology, CosmologyError};
use crate::algo::quadrature::{integrate, QuadratureConfig};
use crate::units::{Length, LengthExt};

/// Speed of light in km/s
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// A spatially flat universe containing matter, radiation and a cosmological constant.
///
/// The dark-energy density is fixed by flatness: `Ω_Λ = 1 - Ω_m - Ω_r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatLambdaCdm {
    /// Hubble constant in km s⁻¹ Mpc⁻¹
    h0: f64,
    /// Present-day matter density parameter
    omega_m: f64,
    /// Present-day radiation density parameter
    omega_r: f64,
}

impl FlatLambdaCdm {
    /// Create a new flat Lambda-CDM cosmology
    ///
    /// # Arguments
    ///
    /// * `h0` - Hubble constant in km s⁻¹ Mpc⁻¹
    /// * `omega_m` - Matter density parameter today
    /// * `omega_r` - Radiation density parameter today (0.0 to neglect radiation)
    ///
    /// # Errors
    ///
    /// Returns `CosmologyError::InvalidParameters` if `h0` is not positive and finite,
    /// a density is negative or non-finite, or the densities exceed closure.
    pub fn new(h0: f64, omega_m: f64, omega_r: f64) -> Result<Self, CosmologyError> {
        if !h0.is_finite() || h0 <= 0.0 {
            return Err(CosmologyError::InvalidParameters(format!(
                "Hubble constant must be positive, got {h0}"
            )));
        }
        if !omega_m.is_finite() || !omega_r.is_finite() || omega_m < 0.0 || omega_r < 0.0 {
            return Err(CosmologyError::InvalidParameters(format!(
                "Density parameters must be non-negative, got Ω_m={omega_m}, Ω_r={omega_r}"
            )));
        }
        if omega_m + omega_r > 1.0 {
            return Err(CosmologyError::InvalidParameters(format!(
                "Ω_m + Ω_r must not exceed 1 in a flat universe, got {}",
                omega_m + omega_r
            )));
        }

        Ok(Self {
            h0,
            omega_m,
            omega_r,
        })
    }

    /// Planck 2018 (TT,TE,EE+lowE+lensing+BAO) parameters
    pub const fn planck18() -> Self {
        Self {
            h0: 67.66,
            omega_m: 0.30966,
            omega_r: 0.0,
        }
    }

    /// Planck 2015 parameters
    pub const fn planck15() -> Self {
        Self {
            h0: 67.74,
            omega_m: 0.3075,
            omega_r: 0.0,
        }
    }

    /// WMAP 9-year parameters
    pub const fn wmap9() -> Self {
        Self {
            h0: 69.32,
            omega_m: 0.2865,
            omega_r: 0.0,
        }
    }

    pub fn h0(&self) -> f64 {
        self.h0
    }

    pub fn omega_m(&self) -> f64 {
        self.omega_m
    }

    pub fn omega_r(&self) -> f64 {
        self.omega_r
    }

    /// Dark-energy density parameter implied by flatness
    pub fn omega_lambda(&self) -> f64 {
        1.0 - self.omega_m - self.omega_r
    }

    /// Hubble distance c / H0
    pub fn hubble_distance(&self) -> Length {
        Length::from_megaparsecs(SPEED_OF_LIGHT_KM_S / self.h0)
    }

    /// Dimensionless Hubble parameter E(z) = H(z) / H0
    pub fn efunc(&self, z: f64) -> f64 {
        let a_inv = 1.0 + z;
        (self.omega_m * a_inv.powi(3) + self.omega_r * a_inv.powi(4) + self.omega_lambda()).sqrt()
    }

    fn check_redshift(z: f64) -> Result<(), CosmologyError> {
        if !z.is_finite() || z <= -1.0 {
            return Err(CosmologyError::InvalidRedshift(z));
        }
        Ok(())
    }

    /// Line-of-sight comoving distance to redshift `z`
    ///
    /// Negative redshifts above -1 yield a negative distance.
    pub fn comoving_distance(&self, z: f64) -> Result<Length, CosmologyError> {
        Self::check_redshift(z)?;

        let result = integrate(
            |zp| 1.0 / self.efunc(zp),
            0.0,
            z,
            &QuadratureConfig::default(),
        );
        let distance = self.hubble_distance() * result.value;
        log::debug!(
            "Comoving distance to z={z}: {:.4} Mpc (integral err {:.2e})",
            distance.as_megaparsecs(),
            result.abs_error
        );

        Ok(distance)
    }

    /// Luminosity distance to redshift `z`
    pub fn luminosity_distance(&self, z: f64) -> Result<Length, CosmologyError> {
        Ok(self.comoving_distance(z)? * (1.0 + z))
    }
}

impl Default for FlatLambdaCdm {
    fn default() -> Self {
        Self::planck18()
    }
}

impl Cosmology for FlatLambdaCdm {
    fn angular_diameter_distance(&self, z: f64) -> Result<Length, CosmologyError> {
        Ok(self.comoving_distance(z)? / (1.0 + z))
    }
}
