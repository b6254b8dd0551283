use crate::algo::interp::InterpolationKind;
use crate::config::{ConfigError, PipelineConfig};
use crate::cosmology::FlatLambdaCdm;
use crate::photometry::spectrum::Band;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default redshift grid for tabulation binaries (z = 0 has no finite distance modulus)
const DEFAULT_REDSHIFT_GRID: &str = "0.05:1.0:0.05";

/// Upper bound on the number of points in a parsed redshift grid
const MAX_GRID_POINTS: f64 = 1.0e6;

/// Evenly spaced redshift samples parsed from "start:stop:step"
#[derive(Debug, Clone, PartialEq)]
pub struct RedshiftGrid(pub Vec<f64>);

/// Parse a grid string in format "start:stop:step" (stop inclusive)
fn parse_redshift_grid(s: &str) -> Result<RedshiftGrid, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err("Redshift grid must be in format 'start:stop:step'".to_string());
    }

    let parse = |name: &str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid {name} value: {value}"))
    };
    let start = parse("start", parts[0])?;
    let stop = parse("stop", parts[1])?;
    let step = parse("step", parts[2])?;

    if !step.is_finite() || step <= 0.0 {
        return Err(format!("Step must be positive, got {step}"));
    }
    if !start.is_finite() || !stop.is_finite() || stop < start {
        return Err(format!("Stop must not be below start, got {start}..{stop}"));
    }
    if start <= -1.0 {
        return Err(format!("Redshifts must be above -1, got {start}"));
    }

    let intervals = ((stop - start) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals + 1.0 > MAX_GRID_POINTS {
        return Err(format!(
            "Redshift grid {start}:{stop}:{step} exceeds {MAX_GRID_POINTS} points"
        ));
    }
    let count = intervals as usize + 1;
    Ok(RedshiftGrid(
        (0..count).map(|i| start + step * i as f64).collect(),
    ))
}

impl std::str::FromStr for RedshiftGrid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_redshift_grid(s)
    }
}

/// Interpolation schemes selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InterpolationArg {
    Linear,
    Nearest,
    Previous,
    Next,
}

impl From<InterpolationArg> for InterpolationKind {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Linear => InterpolationKind::Linear,
            InterpolationArg::Nearest => InterpolationKind::Nearest,
            InterpolationArg::Previous => InterpolationKind::Previous,
            InterpolationArg::Next => InterpolationKind::Next,
        }
    }
}

/// Available cosmology presets
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CosmologyPreset {
    /// Planck 2018 (H0=67.66, Ω_m=0.30966) - Default
    Planck18,
    /// Planck 2015 (H0=67.74, Ω_m=0.3075)
    Planck15,
    /// WMAP 9-year (H0=69.32, Ω_m=0.2865)
    Wmap9,
}

impl std::fmt::Display for CosmologyPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CosmologyPreset::Planck18 => write!(f, "planck18"),
            CosmologyPreset::Planck15 => write!(f, "planck15"),
            CosmologyPreset::Wmap9 => write!(f, "wmap9"),
        }
    }
}

impl CosmologyPreset {
    /// Get the corresponding cosmology for the selected preset
    pub fn to_cosmology(&self) -> FlatLambdaCdm {
        match self {
            CosmologyPreset::Planck18 => FlatLambdaCdm::planck18(),
            CosmologyPreset::Planck15 => FlatLambdaCdm::planck15(),
            CosmologyPreset::Wmap9 => FlatLambdaCdm::wmap9(),
        }
    }
}

/// Common arguments shared across correction binaries
#[derive(Parser, Debug, Clone)]
pub struct SharedCorrectionArgs {
    /// JSON pipeline configuration; command line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lower edge of the integration window in nanometers
    #[arg(long)]
    pub low: Option<f64>,

    /// Upper edge of the integration window in nanometers
    #[arg(long)]
    pub high: Option<f64>,

    /// Interpolation for template and response curves
    #[arg(long, value_enum)]
    pub interpolation: Option<InterpolationArg>,

    /// Cosmology preset (overrides the config file cosmology)
    #[arg(long, value_enum)]
    pub cosmology: Option<CosmologyPreset>,

    /// Redshift grid as "start:stop:step"
    #[arg(long, default_value = DEFAULT_REDSHIFT_GRID)]
    pub redshifts: RedshiftGrid,

    /// Log the time taken by each K-correction
    #[arg(long, default_value_t = false)]
    pub report_time: bool,

    /// Fail instead of emitting non-finite corrections
    #[arg(long, default_value_t = false)]
    pub validate_overlap: bool,
}

impl SharedCorrectionArgs {
    /// Resolve the pipeline configuration: file (or defaults) then flag overrides
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Loading pipeline config from: {}", path.display());
                PipelineConfig::load_from_file(path)?
            }
            None => PipelineConfig::default(),
        };

        let kcorrection = &mut config.kcorrection;
        let low = self.low.unwrap_or(kcorrection.band.lower_nm);
        let high = self.high.unwrap_or(kcorrection.band.upper_nm);
        kcorrection.band = Band {
            lower_nm: low,
            upper_nm: high,
        };
        if let Some(interpolation) = self.interpolation {
            kcorrection.interpolation = interpolation.into();
        }
        kcorrection.report_time |= self.report_time;
        kcorrection.validate_overlap |= self.validate_overlap;

        if let Some(preset) = self.cosmology {
            let cosmology = preset.to_cosmology();
            config.cosmology.h0 = cosmology.h0();
            config.cosmology.omega_m = cosmology.omega_m();
            config.cosmology.omega_r = cosmology.omega_r();
        }

        Ok(config)
    }
}
