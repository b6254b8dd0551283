//! One-dimensional interpolation over tabulated samples.
//!
//! A [`SampleTable`] holds validated `(x, y)` pairs with strictly increasing
//! abscissae. Two evaluation views are built on top of it, differing only in
//! what happens outside the tabulated range:
//!
//! - [`ZeroPaddedCurve`]: returns exactly `0.0` outside `[x_min, x_max]`. Used for
//!   spectral templates and response curves so integrands vanish where nothing
//!   is known.
//! - [`StrictCurve`]: fails with [`InterpError::OutOfBounds`] outside the range.
//!   Used for lookup tables where no fallback value exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length ({0} vs {1})")]
    MismatchedLengths(usize, usize),
    #[error("X values must be strictly ascending (index {0})")]
    UnsortedData(usize),
    #[error("X values must be finite (index {0})")]
    NonFinite(usize),
}

/// How values between two bracketing samples are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    /// Straight line between the bracketing samples
    #[default]
    Linear,
    /// Value of the closer sample (ties go to the lower sample)
    Nearest,
    /// Value of the lower bracketing sample
    Previous,
    /// Value of the upper bracketing sample
    Next,
}

impl std::fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationKind::Linear => write!(f, "linear"),
            InterpolationKind::Nearest => write!(f, "nearest"),
            InterpolationKind::Previous => write!(f, "previous"),
            InterpolationKind::Next => write!(f, "next"),
        }
    }
}

/// An ordered table of `(x, y)` samples with strictly increasing `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct SampleTable {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleTable {
    /// Create a table from separate x and y columns
    ///
    /// # Errors
    ///
    /// * `InterpError::MismatchedLengths` - columns differ in length
    /// * `InterpError::InsufficientData` - fewer than 2 samples
    /// * `InterpError::NonFinite` - an x value is NaN or infinite
    /// * `InterpError::UnsortedData` - x values are not strictly ascending
    pub fn from_columns(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, InterpError> {
        if xs.len() != ys.len() {
            return Err(InterpError::MismatchedLengths(xs.len(), ys.len()));
        }

        if xs.len() < 2 {
            return Err(InterpError::InsufficientData);
        }

        if let Some(idx) = xs.iter().position(|x| !x.is_finite()) {
            return Err(InterpError::NonFinite(idx));
        }

        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(InterpError::UnsortedData(i));
            }
        }

        Ok(Self { xs, ys })
    }

    /// Create a table from `[x, y]` rows
    pub fn from_rows(rows: &[[f64; 2]]) -> Result<Self, InterpError> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = rows.iter().map(|&[x, y]| (x, y)).unzip();
        Self::from_columns(xs, ys)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed table; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Inclusive `(min, max)` of the tabulated x values
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Whether `x` lies within the tabulated range (inclusive)
    pub fn contains(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// View this table as a function that is zero outside its domain
    pub fn zero_padded(&self, kind: InterpolationKind) -> ZeroPaddedCurve<'_> {
        ZeroPaddedCurve { table: self, kind }
    }

    /// View this table as a function that refuses out-of-domain queries
    pub fn strict(&self, kind: InterpolationKind) -> StrictCurve<'_> {
        StrictCurve { table: self, kind }
    }

    /// Interpolate at an x already known to be inside the domain.
    fn interpolate_in_domain(&self, x: f64, kind: InterpolationKind) -> f64 {
        let xs = &self.xs;
        let ys = &self.ys;

        // Binary search for the first sample at or above x
        let idx = xs.partition_point(|&sample| sample < x);
        if xs[idx] == x {
            return ys[idx];
        }

        let i1 = idx - 1;
        let i2 = idx;

        let x1 = xs[i1];
        let x2 = xs[i2];
        let y1 = ys[i1];
        let y2 = ys[i2];

        match kind {
            InterpolationKind::Linear => {
                let t = (x - x1) / (x2 - x1);
                y1 + t * (y2 - y1)
            }
            InterpolationKind::Nearest => {
                if x - x1 <= x2 - x {
                    y1
                } else {
                    y2
                }
            }
            InterpolationKind::Previous => y1,
            InterpolationKind::Next => y2,
        }
    }
}

impl TryFrom<Vec<[f64; 2]>> for SampleTable {
    type Error = InterpError;

    fn try_from(rows: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<SampleTable> for Vec<[f64; 2]> {
    fn from(table: SampleTable) -> Self {
        table
            .xs
            .into_iter()
            .zip(table.ys)
            .map(|(x, y)| [x, y])
            .collect()
    }
}

/// Interpolated view of a [`SampleTable`] that evaluates to `0.0` outside its domain.
#[derive(Debug, Clone, Copy)]
pub struct ZeroPaddedCurve<'a> {
    table: &'a SampleTable,
    kind: InterpolationKind,
}

impl ZeroPaddedCurve<'_> {
    /// Evaluate the curve at `x`
    ///
    /// Returns 0.0 if `x` is outside the tabulated range or is NaN.
    pub fn at(&self, x: f64) -> f64 {
        if !self.table.contains(x) {
            return 0.0;
        }
        self.table.interpolate_in_domain(x, self.kind)
    }
}

/// Interpolated view of a [`SampleTable`] that fails outside its domain.
#[derive(Debug, Clone, Copy)]
pub struct StrictCurve<'a> {
    table: &'a SampleTable,
    kind: InterpolationKind,
}

impl StrictCurve<'_> {
    /// Evaluate the curve at `x`
    ///
    /// # Errors
    ///
    /// * `InterpError::OutOfBounds` - x is outside \\[xs\\[0\\], xs\\[n-1\\]\\] (or NaN)
    pub fn at(&self, x: f64) -> Result<f64, InterpError> {
        if !self.table.contains(x) {
            let (lo, hi) = self.table.domain();
            return Err(InterpError::OutOfBounds(x, lo, hi));
        }
        Ok(self.table.interpolate_in_domain(x, self.kind))
    }
}
