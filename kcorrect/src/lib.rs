//! K-corrections and distance moduli for galaxy photometry
//!
//! This crate computes band K-corrections by integrating tabulated spectral
//! templates against instrument response curves, converts observed apparent
//! magnitudes to absolute magnitudes with precomputed correction tables, and
//! evaluates distance moduli under a flat Lambda-CDM cosmology.

pub mod algo;
pub mod config;
pub mod cosmology;
pub mod error;
pub mod photometry;
pub mod shared_args;
pub mod units;

// Re-exports for easier access
pub use algo::interp::{InterpolationKind, SampleTable};
pub use config::{KCorrectionConfig, PipelineConfig};
pub use cosmology::{default_cosmology, distance_modulus, Cosmology, FlatLambdaCdm};
pub use error::KCorrectError;
pub use photometry::kcorrection::{
    emitted_frame_integral, observed_frame_integral, r_band_k_correction,
};
pub use photometry::magnitudes::apply_k_correction;
