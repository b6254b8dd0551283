//! Apparent to absolute magnitude conversion
//!
//! Corrections are read from a precomputed `(z, K)` table through strict-domain
//! interpolation: a redshift outside the table is an error, never a silent zero.

use ndarray::{Array1, ArrayView1, Zip};

use crate::algo::interp::{InterpolationKind, SampleTable};
use crate::cosmology::{distance_modulus, Cosmology};
use crate::error::KCorrectError;

fn check_shapes(
    observed_mags: &ArrayView1<f64>,
    redshifts: &ArrayView1<f64>,
) -> Result<(), KCorrectError> {
    if observed_mags.len() != redshifts.len() {
        return Err(KCorrectError::ShapeMismatch {
            magnitudes: observed_mags.len(),
            redshifts: redshifts.len(),
        });
    }
    Ok(())
}

/// Subtract the tabulated K-correction from each observed magnitude.
///
/// `A[i] = R[i] - K(Z[i])`, with `K` interpolated from `kcorr_table`.
///
/// # Arguments
///
/// * `observed_mags` - Observed apparent magnitudes
/// * `redshifts` - Redshift of each object, paired element-wise with `observed_mags`
/// * `kcorr_table` - Precomputed redshift to K-correction table
/// * `kind` - Interpolation between tabulated redshifts
///
/// # Errors
///
/// * `KCorrectError::ShapeMismatch` - the arrays differ in length
/// * `KCorrectError::Domain` - a redshift lies outside the table
pub fn apply_k_correction(
    observed_mags: ArrayView1<f64>,
    redshifts: ArrayView1<f64>,
    kcorr_table: &SampleTable,
    kind: InterpolationKind,
) -> Result<Array1<f64>, KCorrectError> {
    check_shapes(&observed_mags, &redshifts)?;

    let curve = kcorr_table.strict(kind);
    let corrections = redshifts
        .iter()
        .map(|&z| curve.at(z))
        .collect::<Result<Array1<f64>, _>>()?;

    Ok(Zip::from(&observed_mags)
        .and(&corrections)
        .map_collect(|&mag, &k| mag - k))
}

/// Absolute magnitudes including both distance modulus and K-correction.
///
/// `M[i] = R[i] - DM(Z[i]) - K(Z[i])`, with `cosmology` falling back to the
/// process-wide default when `None`.
pub fn absolute_magnitudes(
    observed_mags: ArrayView1<f64>,
    redshifts: ArrayView1<f64>,
    kcorr_table: &SampleTable,
    kind: InterpolationKind,
    cosmology: Option<&dyn Cosmology>,
) -> Result<Array1<f64>, KCorrectError> {
    let k_corrected = apply_k_correction(observed_mags, redshifts, kcorr_table, kind)?;
    let moduli = redshifts
        .iter()
        .map(|&z| distance_modulus(z, cosmology))
        .collect::<Result<Array1<f64>, _>>()?;

    Ok(k_corrected - moduli)
}
