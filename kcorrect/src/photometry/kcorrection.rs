//! K-corrections from template and response curve integration
//!
//! The K-correction of a band is derived from two integrals over the same
//! wavelength window `[low, high]`:
//!
//! - emitted frame: `E = ∫ λ T(λ) R(λ) dλ`
//! - observed frame: `O = ∫ λ T(λ / (1+z)) R(λ) dλ`
//!
//! combined as `K(z) = -2.5 log10(O / E / (1+z))`.
//!
//! Template and response are evaluated through zero-padded interpolation so the
//! integrands vanish wherever either curve is undefined. Degenerate inputs
//! (no overlap, `z = -1`) produce non-finite corrections unless overlap
//! validation is enabled in [`KCorrectionConfig`].

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::algo::interp::SampleTable;
use crate::algo::quadrature::{integrate, QuadratureConfig, QuadratureResult};
use crate::config::KCorrectionConfig;
use crate::error::KCorrectError;
use crate::photometry::spectrum::Band;

/// Integrates template/response products in the emitted and observed frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntegrator {
    quadrature: QuadratureConfig,
}

impl FrameIntegrator {
    pub fn new(quadrature: QuadratureConfig) -> Self {
        Self { quadrature }
    }

    /// `∫ λ T(λ) R(λ) dλ` over `[low, high]`
    pub fn emitted<T, R>(&self, template: T, response: R, low: f64, high: f64) -> QuadratureResult
    where
        T: Fn(f64) -> f64,
        R: Fn(f64) -> f64,
    {
        integrate(
            |wavelength| wavelength * template(wavelength) * response(wavelength),
            low,
            high,
            &self.quadrature,
        )
    }

    /// `∫ λ T(λ / (1+z)) R(λ) dλ` over `[low, high]`
    pub fn observed<T, R>(
        &self,
        z: f64,
        template: T,
        response: R,
        low: f64,
        high: f64,
    ) -> QuadratureResult
    where
        T: Fn(f64) -> f64,
        R: Fn(f64) -> f64,
    {
        let stretch = 1.0 + z;
        integrate(
            |wavelength| wavelength * template(wavelength / stretch) * response(wavelength),
            low,
            high,
            &self.quadrature,
        )
    }
}

/// Emitted-frame integral with default quadrature tolerances
pub fn emitted_frame_integral<T, R>(template: T, response: R, low: f64, high: f64) -> QuadratureResult
where
    T: Fn(f64) -> f64,
    R: Fn(f64) -> f64,
{
    FrameIntegrator::default().emitted(template, response, low, high)
}

/// Observed-frame integral with default quadrature tolerances
pub fn observed_frame_integral<T, R>(
    z: f64,
    template: T,
    response: R,
    low: f64,
    high: f64,
) -> QuadratureResult
where
    T: Fn(f64) -> f64,
    R: Fn(f64) -> f64,
{
    FrameIntegrator::default().observed(z, template, response, low, high)
}

/// Combine frame integrals into a K-correction in magnitudes.
///
/// Non-finite for `emitted == 0`, `observed <= 0` or `z == -1`.
pub fn k_correction_from_integrals(emitted: f64, observed: f64, z: f64) -> f64 {
    -2.5 * (observed / emitted / (1.0 + z)).log10()
}

/// A K-correction together with the integrals it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KCorrection {
    /// Redshift the correction applies to
    pub z: f64,
    /// Correction in magnitudes
    pub value: f64,
    pub emitted: QuadratureResult,
    pub observed: QuadratureResult,
    /// Wall-clock time spent on both integrals
    pub elapsed: Duration,
}

/// Computes K-corrections for one band configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KCorrector {
    config: KCorrectionConfig,
}

impl KCorrector {
    pub fn new(config: KCorrectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KCorrectionConfig {
        &self.config
    }

    /// Evaluate the K-correction at `z` with full diagnostics
    ///
    /// # Errors
    ///
    /// Returns `KCorrectError::Degenerate` only when `validate_overlap` is enabled
    /// and the integrals cannot form a finite correction.
    pub fn evaluate(
        &self,
        z: f64,
        template: &SampleTable,
        response: &SampleTable,
    ) -> Result<KCorrection, KCorrectError> {
        let start = Instant::now();

        let template_fn = template.zero_padded(self.config.interpolation);
        let response_fn = response.zero_padded(self.config.interpolation);
        let integrator = FrameIntegrator::new(self.config.quadrature);
        let Band { lower_nm, upper_nm } = self.config.band;

        let emitted = integrator.emitted(
            |l| template_fn.at(l),
            |l| response_fn.at(l),
            lower_nm,
            upper_nm,
        );
        let observed = integrator.observed(
            z,
            |l| template_fn.at(l),
            |l| response_fn.at(l),
            lower_nm,
            upper_nm,
        );

        log::debug!(
            "z={z}: emitted {:.6e} ± {:.1e}, observed {:.6e} ± {:.1e}",
            emitted.value,
            emitted.abs_error,
            observed.value,
            observed.abs_error
        );

        if self.config.validate_overlap {
            check_overlap(z, emitted.value, observed.value)?;
        }

        let value = k_correction_from_integrals(emitted.value, observed.value, z);
        let elapsed = start.elapsed();

        if self.config.report_time {
            log::info!("K-correction at z={z} computed in {elapsed:?}");
        }

        Ok(KCorrection {
            z,
            value,
            emitted,
            observed,
            elapsed,
        })
    }

    /// K-correction value at `z`
    pub fn k_correction(
        &self,
        z: f64,
        template: &SampleTable,
        response: &SampleTable,
    ) -> Result<f64, KCorrectError> {
        Ok(self.evaluate(z, template, response)?.value)
    }

    /// Tabulate K(z) over a strictly increasing redshift grid.
    ///
    /// Redshifts are evaluated in parallel. The result is suitable as the lookup
    /// table for [`apply_k_correction`](crate::photometry::magnitudes::apply_k_correction).
    pub fn tabulate(
        &self,
        redshifts: &[f64],
        template: &SampleTable,
        response: &SampleTable,
    ) -> Result<SampleTable, KCorrectError> {
        let corrections = redshifts
            .par_iter()
            .map(|&z| self.k_correction(z, template, response))
            .collect::<Result<Vec<f64>, KCorrectError>>()?;

        Ok(SampleTable::from_columns(redshifts.to_vec(), corrections)?)
    }
}

fn check_overlap(z: f64, emitted: f64, observed: f64) -> Result<(), KCorrectError> {
    if z <= -1.0 {
        return Err(KCorrectError::Degenerate(format!(
            "redshift {z} has no observed frame"
        )));
    }
    if !emitted.is_finite() || emitted == 0.0 {
        return Err(KCorrectError::Degenerate(format!(
            "emitted-frame integral is {emitted}; template and response do not overlap in the window"
        )));
    }
    if !observed.is_finite() || observed <= 0.0 {
        return Err(KCorrectError::Degenerate(format!(
            "observed-frame integral at z={z} is {observed}"
        )));
    }
    Ok(())
}

/// K-correction through the DES r-band window (or any `[low, high]` window).
///
/// Uses linear interpolation and default quadrature tolerances. The DES r-band
/// defaults are [`DES_R_BAND_LOWER_NM`](crate::photometry::spectrum::DES_R_BAND_LOWER_NM)
/// and [`DES_R_BAND_UPPER_NM`](crate::photometry::spectrum::DES_R_BAND_UPPER_NM).
///
/// # Examples
///
/// ```rust
/// use kcorrect::algo::SampleTable;
/// use kcorrect::photometry::kcorrection::r_band_k_correction;
///
/// let flat = SampleTable::from_rows(&[[500.0, 1.0], [600.0, 1.0], [700.0, 1.0]])?;
/// let k = r_band_k_correction(0.0, &flat, &flat, 540.0, 700.0, false)?;
/// assert!(k.abs() < 1e-10);
/// # Ok::<(), kcorrect::KCorrectError>(())
/// ```
pub fn r_band_k_correction(
    z: f64,
    template: &SampleTable,
    response: &SampleTable,
    low: f64,
    high: f64,
    report_time: bool,
) -> Result<f64, KCorrectError> {
    let config = KCorrectionConfig {
        band: Band {
            lower_nm: low,
            upper_nm: high,
        },
        report_time,
        ..KCorrectionConfig::default()
    };
    KCorrector::new(config).k_correction(z, template, response)
}

/// Tabulate K(z) for each redshift with the given configuration
pub fn tabulate_k_correction(
    redshifts: &[f64],
    template: &SampleTable,
    response: &SampleTable,
    config: &KCorrectionConfig,
) -> Result<SampleTable, KCorrectError> {
    KCorrector::new(*config).tabulate(redshifts, template, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::interp::{InterpError, InterpolationKind};
    use crate::photometry::spectrum::{power_law_table, top_hat_response};
    use approx::assert_relative_eq;

    fn flat_unit() -> SampleTable {
        SampleTable::from_rows(&[[500.0, 1.0], [600.0, 1.0], [700.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_emitted_integral_flat_curves() {
        let table = flat_unit();
        let curve = table.zero_padded(InterpolationKind::Linear);
        let result = emitted_frame_integral(|l| curve.at(l), |l| curve.at(l), 540.0, 700.0);

        // ∫ λ dλ from 540 to 700
        assert_relative_eq!(result.value, 99_200.0, max_relative = 1e-10);
        assert!(result.abs_error < 1e-3);
    }

    #[test]
    fn test_frames_agree_at_zero_redshift() {
        let table = flat_unit();
        let curve = table.zero_padded(InterpolationKind::Linear);
        let emitted = emitted_frame_integral(|l| curve.at(l), |l| curve.at(l), 540.0, 700.0);
        let observed =
            observed_frame_integral(0.0, |l| curve.at(l), |l| curve.at(l), 540.0, 700.0);
        assert_relative_eq!(emitted.value, observed.value, max_relative = 1e-12);
    }

    #[test]
    fn test_observed_integral_shifts_template() {
        // Template lives on [250, 350] in the rest frame; at z=1 it covers [500, 700]
        let template = SampleTable::from_rows(&[[250.0, 1.0], [350.0, 1.0]]).unwrap();
        let template_fn = template.zero_padded(InterpolationKind::Linear);
        let response = |_l: f64| 1.0;

        let emitted = emitted_frame_integral(|l| template_fn.at(l), response, 500.0, 700.0);
        assert_eq!(emitted.value, 0.0);

        let observed =
            observed_frame_integral(1.0, |l| template_fn.at(l), response, 500.0, 700.0);
        assert_relative_eq!(observed.value, 120_000.0, max_relative = 1e-10);
    }

    #[test]
    fn test_combiner() {
        assert_eq!(k_correction_from_integrals(2.0, 2.0, 0.0), 0.0);
        // O / E / (1+z) = 10 => K = -2.5
        assert_relative_eq!(k_correction_from_integrals(1.0, 20.0, 1.0), -2.5, epsilon = 1e-12);
        assert_relative_eq!(
            k_correction_from_integrals(1.0, 1.0, 1.0),
            2.5 * 2f64.log10(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_combiner_degenerate_inputs_are_non_finite() {
        assert!(!k_correction_from_integrals(0.0, 1.0, 0.5).is_finite());
        assert!(!k_correction_from_integrals(1.0, 0.0, 0.5).is_finite());
        assert!(k_correction_from_integrals(1.0, -1.0, 0.5).is_nan());
        assert!(!k_correction_from_integrals(1.0, 1.0, -1.0).is_finite());
    }

    #[test]
    fn test_r_band_zero_redshift_flat() {
        let table = flat_unit();
        let k = r_band_k_correction(0.0, &table, &table, 540.0, 700.0, false).unwrap();
        assert_relative_eq!(k, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_r_band_default_window_symmetric_curves() {
        let table = SampleTable::from_rows(&[
            [520.0, 0.0],
            [580.0, 1.0],
            [635.0, 2.0],
            [690.0, 1.0],
            [750.0, 0.0],
        ])
        .unwrap();
        let k = r_band_k_correction(0.0, &table, &table, 540.0, 730.0, true).unwrap();
        assert_relative_eq!(k, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_f_lambda_template_matches_analytic() {
        // Constant template across the window at all relevant redshifts:
        // O == E, so K = 2.5 log10(1 + z)
        let template = power_law_table(0.0, &Band::from_nm_bounds(100.0, 1000.0), 10).unwrap();
        let response = top_hat_response(&Band::des_r(), 1.0).unwrap();
        let corrector = KCorrector::default();

        for z in [0.0, 0.1, 0.3, 0.5] {
            let k = corrector.k_correction(z, &template, &response).unwrap();
            assert_relative_eq!(k, 2.5 * (1.0 + z).log10(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_evaluate_diagnostics() {
        let table = flat_unit();
        let config = KCorrectionConfig {
            band: Band::from_nm_bounds(540.0, 700.0),
            ..KCorrectionConfig::default()
        };
        let result = KCorrector::new(config).evaluate(0.2, &table, &table).unwrap();

        assert_eq!(result.z, 0.2);
        assert!(result.emitted.converged);
        assert!(result.observed.converged);
        assert_relative_eq!(result.emitted.value, 99_200.0, max_relative = 1e-10);
        assert_relative_eq!(
            result.value,
            k_correction_from_integrals(result.emitted.value, result.observed.value, 0.2),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_no_overlap_is_permissive_by_default() {
        let template = SampleTable::from_rows(&[[100.0, 1.0], [200.0, 1.0]]).unwrap();
        let response = top_hat_response(&Band::des_r(), 1.0).unwrap();
        let k = KCorrector::default()
            .k_correction(0.1, &template, &response)
            .unwrap();
        assert!(k.is_nan());
    }

    #[test]
    fn test_no_overlap_fails_when_validated() {
        let template = SampleTable::from_rows(&[[100.0, 1.0], [200.0, 1.0]]).unwrap();
        let response = top_hat_response(&Band::des_r(), 1.0).unwrap();
        let config = KCorrectionConfig {
            validate_overlap: true,
            ..KCorrectionConfig::default()
        };
        let result = KCorrector::new(config).k_correction(0.1, &template, &response);
        assert!(matches!(result, Err(KCorrectError::Degenerate(_))));
    }

    #[test]
    fn test_validation_names_missing_observed_frame() {
        let template = flat_unit();
        let config = KCorrectionConfig {
            band: Band::from_nm_bounds(540.0, 700.0),
            validate_overlap: true,
            ..KCorrectionConfig::default()
        };
        let corrector = KCorrector::new(config);

        for z in [-1.0, -1.5] {
            let result = corrector.k_correction(z, &template, &template);
            assert!(
                matches!(&result, Err(KCorrectError::Degenerate(msg)) if msg.contains("no observed frame")),
                "z={z} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_blueshift_with_covering_template() {
        // Negative redshifts read the template redward of the window
        let redshifts = [-0.3, 0.0, 0.3];
        let coverage = Band::des_r().rest_frame_coverage(&redshifts);
        let template = power_law_table(0.0, &coverage, 64).unwrap();
        let response = top_hat_response(&Band::des_r(), 1.0).unwrap();

        let table = tabulate_k_correction(
            &redshifts,
            &template,
            &response,
            &KCorrectionConfig::default(),
        )
        .unwrap();

        for (&z, &k) in redshifts.iter().zip(table.ys()) {
            assert!(k.is_finite(), "K({z}) = {k}");
            assert_relative_eq!(k, 2.5 * (1.0 + z).log10(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_tabulate() {
        let template = power_law_table(-1.0, &Band::from_nm_bounds(200.0, 1000.0), 81).unwrap();
        let response = top_hat_response(&Band::des_r(), 1.0).unwrap();
        let redshifts = [0.0, 0.1, 0.2, 0.4];

        let table = tabulate_k_correction(
            &redshifts,
            &template,
            &response,
            &KCorrectionConfig::default(),
        )
        .unwrap();

        assert_eq!(table.xs(), &redshifts);
        assert_relative_eq!(table.ys()[0], 0.0, epsilon = 1e-9);
        for (&z, &k) in redshifts.iter().zip(table.ys()) {
            let single = r_band_k_correction(z, &template, &response, 540.0, 730.0, false).unwrap();
            assert_eq!(k, single);
        }
    }

    #[test]
    fn test_tabulate_requires_increasing_redshifts() {
        let table = flat_unit();
        let result = tabulate_k_correction(
            &[0.2, 0.1],
            &table,
            &table,
            &KCorrectionConfig::default(),
        );
        assert!(matches!(
            result,
            Err(KCorrectError::InvalidInput(InterpError::UnsortedData(1)))
        ));
    }
}
