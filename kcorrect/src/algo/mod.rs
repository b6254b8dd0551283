//! Numerical algorithms backing the photometry pipeline
//!
//! This module provides tabulated-function interpolation and adaptive
//! quadrature, the two numerical services the K-correction and cosmology
//! code is built on.

pub mod interp;
pub mod quadrature;

pub use interp::{InterpError, InterpolationKind, SampleTable, StrictCurve, ZeroPaddedCurve};
pub use quadrature::{integrate, QuadratureConfig, QuadratureResult};
