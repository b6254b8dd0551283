//! Photometry models and utilities

pub mod kcorrection;
pub mod magnitudes;
pub mod spectrum;

pub use kcorrection::{
    emitted_frame_integral, k_correction_from_integrals, observed_frame_integral,
    r_band_k_correction, tabulate_k_correction, FrameIntegrator, KCorrection, KCorrector,
};
pub use magnitudes::{absolute_magnitudes, apply_k_correction};
pub use spectrum::Band;
