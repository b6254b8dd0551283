//! Pipeline configuration
//!
//! Configuration is plain data with defaults matching the DES r-band setup
//! and can be persisted as pretty-printed JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algo::interp::InterpolationKind;
use crate::algo::quadrature::QuadratureConfig;
use crate::cosmology::{CosmologyError, FlatLambdaCdm};
use crate::photometry::spectrum::Band;

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for K-correction evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KCorrectionConfig {
    /// Wavelength window the frame integrals run over
    pub band: Band,

    /// Interpolation used for template and response curves
    pub interpolation: InterpolationKind,

    /// Quadrature tolerances for both frame integrals
    pub quadrature: QuadratureConfig,

    /// Log the wall-clock time of each evaluation at info level
    pub report_time: bool,

    /// Fail with `Degenerate` instead of returning a non-finite correction
    pub validate_overlap: bool,
}

impl Default for KCorrectionConfig {
    fn default() -> Self {
        Self {
            band: Band::des_r(),
            interpolation: InterpolationKind::Linear,
            quadrature: QuadratureConfig::default(),
            report_time: false,
            validate_overlap: false,
        }
    }
}

/// Parameters of the flat Lambda-CDM distance provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmologyConfig {
    /// Hubble constant in km s⁻¹ Mpc⁻¹
    pub h0: f64,
    pub omega_m: f64,
    pub omega_r: f64,
}

impl CosmologyConfig {
    /// Build the cosmology described by this configuration
    pub fn build(&self) -> Result<FlatLambdaCdm, CosmologyError> {
        FlatLambdaCdm::new(self.h0, self.omega_m, self.omega_r)
    }
}

impl Default for CosmologyConfig {
    fn default() -> Self {
        let planck = FlatLambdaCdm::planck18();
        Self {
            h0: planck.h0(),
            omega_m: planck.omega_m(),
            omega_r: planck.omega_r(),
        }
    }
}

/// Complete configuration for a correction run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub kcorrection: KCorrectionConfig,
    pub cosmology: CosmologyConfig,
}

impl PipelineConfig {
    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
