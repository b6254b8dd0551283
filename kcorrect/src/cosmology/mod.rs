//! Cosmological distances and the distance modulus
//!
//! Distances are supplied by a [`Cosmology`] implementation. Callers normally
//! inject one explicitly; [`default_cosmology`] provides a shared, lazily
//! constructed Planck 2018 flat Lambda-CDM model for convenience entry points.

pub mod lambda_cdm;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::error::KCorrectError;
use crate::units::{Length, LengthExt};

pub use lambda_cdm::FlatLambdaCdm;

/// Errors raised by cosmology providers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CosmologyError {
    #[error("Cannot resolve a distance at redshift {0}")]
    InvalidRedshift(f64),

    #[error("Invalid cosmological parameters: {0}")]
    InvalidParameters(String),
}

/// A background cosmology able to resolve distances at a given redshift.
pub trait Cosmology: Send + Sync {
    /// Angular-diameter distance to an object at redshift `z`
    fn angular_diameter_distance(&self, z: f64) -> Result<Length, CosmologyError>;
}

static DEFAULT_COSMOLOGY: Lazy<FlatLambdaCdm> = Lazy::new(FlatLambdaCdm::planck18);

/// Process-wide default cosmology (Planck 2018 flat Lambda-CDM)
pub fn default_cosmology() -> &'static FlatLambdaCdm {
    &DEFAULT_COSMOLOGY
}

/// Distance modulus computed from the angular-diameter distance.
///
/// `DM(z) = 5 log10(D_A(z) / 10 pc)`
///
/// # Arguments
///
/// * `z` - Redshift
/// * `cosmology` - Distance provider, or `None` for [`default_cosmology`]
///
/// # Returns
///
/// The distance modulus in magnitudes. `z = 0` gives `-inf`.
///
/// # Errors
///
/// Propagates `KCorrectError::Cosmology` when the provider cannot resolve `z`.
pub fn distance_modulus(z: f64, cosmology: Option<&dyn Cosmology>) -> Result<f64, KCorrectError> {
    let cosmology = cosmology.unwrap_or_else(|| default_cosmology() as &dyn Cosmology);
    let distance = cosmology.angular_diameter_distance(z)?;
    Ok(5.0 * (distance.as_parsecs() / 10.0).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Static-universe stand-in: D_A grows linearly at 1 Mpc per 0.001 redshift
    struct LinearCosmology;

    impl Cosmology for LinearCosmology {
        fn angular_diameter_distance(&self, z: f64) -> Result<Length, CosmologyError> {
            if z < 0.0 {
                return Err(CosmologyError::InvalidRedshift(z));
            }
            Ok(Length::from_megaparsecs(z * 1000.0))
        }
    }

    #[test]
    fn test_distance_modulus_injected_cosmology() {
        // D_A = 100 Mpc = 1e8 pc => DM = 5 * log10(1e7) = 35
        let dm = distance_modulus(0.1, Some(&LinearCosmology)).unwrap();
        assert_relative_eq!(dm, 35.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_modulus_default_cosmology() {
        let dm = distance_modulus(0.1, None).unwrap();
        assert_relative_eq!(dm, 37.9735, epsilon = 1e-3);

        let explicit = distance_modulus(0.1, Some(default_cosmology())).unwrap();
        assert_eq!(dm, explicit);
    }

    #[test]
    fn test_distance_modulus_increases_with_redshift() {
        let near = distance_modulus(0.1, None).unwrap();
        let far = distance_modulus(1.0, None).unwrap();
        assert!(near < far, "DM(0.1)={near} should be below DM(1.0)={far}");

        let mut previous = f64::NEG_INFINITY;
        for z in [0.01, 0.05, 0.1, 0.3, 0.5, 0.8, 1.0] {
            let dm = distance_modulus(z, None).unwrap();
            assert!(dm > previous);
            previous = dm;
        }
    }

    #[test]
    fn test_distance_modulus_zero_redshift() {
        let dm = distance_modulus(0.0, None).unwrap();
        assert_eq!(dm, f64::NEG_INFINITY);
    }

    #[test]
    fn test_distance_modulus_propagates_errors() {
        let result = distance_modulus(-1.5, None);
        assert!(matches!(
            result,
            Err(KCorrectError::Cosmology(CosmologyError::InvalidRedshift(z))) if z == -1.5
        ));

        let result = distance_modulus(-0.5, Some(&LinearCosmology));
        assert!(matches!(result, Err(KCorrectError::Cosmology(_))));
    }

    #[test]
    fn test_default_cosmology_is_shared() {
        let a = default_cosmology() as *const FlatLambdaCdm;
        let b = default_cosmology() as *const FlatLambdaCdm;
        assert_eq!(a, b);
        assert_eq!(*default_cosmology(), FlatLambdaCdm::planck18());
    }
}
