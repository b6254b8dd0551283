//! K-correction and distance-modulus table generator
//!
//! Tabulates the K-correction of a power-law template observed through a
//! top-hat bandpass over a redshift grid, alongside the distance modulus of
//! the selected cosmology. Output is CSV on stdout with columns
//! `z,k_correction,distance_modulus`.
//!
//! The K-correction column is the lookup table consumed by
//! `apply_k_correction` when converting observed magnitudes.

use clap::Parser;
use kcorrect::cosmology::distance_modulus;
use kcorrect::photometry::kcorrection::KCorrector;
use kcorrect::photometry::spectrum::{power_law_table, top_hat_response};
use kcorrect::shared_args::SharedCorrectionArgs;

#[derive(Parser, Debug)]
#[command(
    name = "K-correction Table",
    about = "Tabulates K(z) and DM(z) for a power-law template through a top-hat band",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    shared: SharedCorrectionArgs,

    /// Power-law slope of the template in wavelength (f_λ ∝ λ^β)
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    beta: f64,

    /// Number of samples in the tabulated template
    #[arg(long, default_value_t = 512)]
    template_samples: usize,

    /// In-band efficiency of the top-hat response
    #[arg(long, default_value_t = 1.0)]
    efficiency: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = args.shared.pipeline_config()?;
    let cosmology = config.cosmology.build()?;
    let redshifts = &args.shared.redshifts.0;

    let band = config.kcorrection.band;
    if band.lower_nm <= 0.0 || band.lower_nm >= band.upper_nm {
        return Err(format!(
            "Invalid integration window {}..{} nm",
            band.lower_nm, band.upper_nm
        )
        .into());
    }
    let template_band = band.rest_frame_coverage(redshifts);
    let template = power_law_table(args.beta, &template_band, args.template_samples)?;
    let response = top_hat_response(&band, args.efficiency)?;

    log::info!(
        "Tabulating {} redshifts over {:.1}-{:.1} nm (β={}, {} interpolation)",
        redshifts.len(),
        band.lower_nm,
        band.upper_nm,
        args.beta,
        config.kcorrection.interpolation
    );

    let corrector = KCorrector::new(config.kcorrection);
    let table = corrector.tabulate(redshifts, &template, &response)?;

    println!("z,k_correction,distance_modulus");
    for (&z, &k) in table.xs().iter().zip(table.ys()) {
        let dm = distance_modulus(z, Some(&cosmology))?;
        println!("{z:.4},{k:.6},{dm:.6}");
    }

    Ok(())
}
