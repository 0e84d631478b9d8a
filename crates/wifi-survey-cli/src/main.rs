//! Command-line front-end for the wifi-survey coverage engine.
//!
//! Works on exported session files; all computation lives in
//! `wifi-survey-core`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use wifi_survey_core::prelude::*;

#[derive(Parser)]
#[command(
    name = "wifi-survey",
    version,
    about = "WiFi site-survey coverage analysis",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG when set).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print per-SSID statistics for an exported session.
    Report {
        /// Path to the exported session JSON.
        session: PathBuf,
    },
    /// Interpolate a measured coverage surface and write it as CSV.
    Heatmap {
        /// Path to the exported session JSON.
        session: PathBuf,
        /// Network to analyze.
        #[arg(long)]
        ssid: String,
        /// Restrict to one access point radio.
        #[arg(long)]
        bssid: Option<String>,
        /// Quantity to map.
        #[arg(long, value_enum, default_value_t = ModeArg::Signal)]
        mode: ModeArg,
        /// Surface style.
        #[arg(long, value_enum, default_value_t = StyleArg::PerCell)]
        style: StyleArg,
        /// Pixels-per-meter scale (required for the smoothed style).
        #[arg(long)]
        scale: Option<f64>,
        /// Floor-plan width in pixels (required for the smoothed style).
        #[arg(long)]
        width_px: Option<u32>,
        /// Floor-plan height in pixels (required for the smoothed style).
        #[arg(long)]
        height_px: Option<u32>,
        /// Output CSV path.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Estimate theoretical coverage from access-point placements and
    /// write it as CSV.
    Coverage {
        /// Pixels-per-meter scale.
        #[arg(long)]
        scale: f64,
        /// Floor-plan width in pixels.
        #[arg(long)]
        width_px: u32,
        /// Floor-plan height in pixels.
        #[arg(long)]
        height_px: u32,
        /// Access-point placement as NAME:X_PX:Y_PX; repeatable.
        #[arg(long = "ap", value_name = "NAME:X_PX:Y_PX", required = true)]
        aps: Vec<String>,
        /// Output CSV path.
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Signal,
    Snr,
    Interference,
}

impl From<ModeArg> for AnalysisMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Signal => Self::Signal,
            ModeArg::Snr => Self::Snr,
            ModeArg::Interference => Self::Interference,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    PerCell,
    Smoothed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Command::Report { session } => report(&session),
        Command::Heatmap {
            session,
            ssid,
            bssid,
            mode,
            style,
            scale,
            width_px,
            height_px,
            output,
        } => heatmap(
            &session, &ssid, bssid.as_deref(), mode, style, scale, width_px, height_px, &output,
        ),
        Command::Coverage {
            scale,
            width_px,
            height_px,
            aps,
            output,
        } => coverage(scale, width_px, height_px, &aps, &output),
    }
}

fn load_store(path: &PathBuf) -> Result<MeasurementStore> {
    MeasurementStore::import_from(path)
        .with_context(|| format!("loading session {}", path.display()))
}

fn report(session: &PathBuf) -> Result<()> {
    let store = load_store(session)?;
    let summaries = summarize(&store);
    if summaries.is_empty() {
        bail!("session contains no named networks");
    }

    println!("{} measurement points, {} networks", store.len(), summaries.len());
    println!();
    for s in &summaries {
        let sample = classify(s.mean_dbm);
        println!("SSID: {}", s.ssid);
        println!("  points: {}  readings: {}", s.points, s.readings);
        println!(
            "  signal: {:.1} dBm (sd {:.1} dB), about {:.0} Mbps ({})",
            s.mean_dbm, s.std_dev_dbm, s.mean_mbps, sample.technology
        );
        println!(
            "  tiers: excellent {}  good {}  fair {}  poor {}  critical {}",
            s.tiers.excellent, s.tiers.good, s.tiers.fair, s.tiers.poor, s.tiers.critical
        );
        println!(
            "  bands: 2.4 GHz {}  5 GHz {}  unknown {}",
            s.bands.band_2_4ghz, s.bands.band_5ghz, s.bands.unknown
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn heatmap(
    session: &PathBuf,
    ssid: &str,
    bssid: Option<&str>,
    mode: ModeArg,
    style: StyleArg,
    scale: Option<f64>,
    width_px: Option<u32>,
    height_px: Option<u32>,
    output: &PathBuf,
) -> Result<()> {
    let store = load_store(session)?;
    let config = SurveyConfig::default();
    let mode = AnalysisMode::from(mode);
    let samples =
        wifi_survey_core::coverage::extract_samples(&store, ssid, bssid, mode, &config);
    info!(ssid, samples = samples.len(), "extracted samples");

    let surface = match style {
        StyleArg::PerCell => {
            wifi_survey_core::coverage::per_cell_surface(&samples, mode.unit(), &config)?
        }
        StyleArg::Smoothed => {
            let (Some(scale), Some(width_px), Some(height_px)) = (scale, width_px, height_px)
            else {
                bail!("the smoothed style needs --scale, --width-px and --height-px");
            };
            let calibration = ScaleCalibration::from_ratio(scale)?;
            let extent = FloorExtent::from_pixels(width_px, height_px, &calibration);
            wifi_survey_core::coverage::smoothed_surface(&samples, &extent, mode.unit(), &config)?
        }
    };

    write_csv(&surface, output)?;
    println!(
        "wrote {}x{} surface to {}",
        surface.shape().0,
        surface.shape().1,
        output.display()
    );
    Ok(())
}

fn coverage(
    scale: f64,
    width_px: u32,
    height_px: u32,
    aps: &[String],
    output: &PathBuf,
) -> Result<()> {
    let calibration = ScaleCalibration::from_ratio(scale)?;
    let aps = aps
        .iter()
        .map(|placement| parse_ap(placement))
        .collect::<Result<Vec<_>>>()?;

    let surface = wifi_survey_core::propagation::estimate_coverage(
        &aps,
        &calibration,
        PixelExtent::new(width_px, height_px),
        &SurveyConfig::default(),
    )?;

    write_csv(&surface, output)?;
    println!(
        "wrote {}x{} coverage estimate for {} APs to {}",
        surface.shape().0,
        surface.shape().1,
        aps.len(),
        output.display()
    );
    Ok(())
}

fn parse_ap(placement: &str) -> Result<AccessPoint> {
    let parts: Vec<&str> = placement.split(':').collect();
    let [name, x, y] = parts.as_slice() else {
        bail!("access point '{placement}' is not NAME:X_PX:Y_PX");
    };
    if name.is_empty() {
        bail!("access point '{placement}' has an empty name");
    }
    let x: f64 = x.parse().with_context(|| format!("x of '{placement}'"))?;
    let y: f64 = y.parse().with_context(|| format!("y of '{placement}'"))?;
    Ok(AccessPoint::new(*name, x, y))
}

fn write_csv(surface: &CoverageSurface, path: &PathBuf) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "x_m,y_m,value")?;
    let (ny, nx) = surface.shape();
    for i in 0..ny {
        for j in 0..nx {
            writeln!(
                out,
                "{},{},{}",
                surface.grid_x()[[i, j]],
                surface.grid_y()[[i, j]],
                surface.value()[[i, j]]
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ap_placements() {
        let ap = parse_ap("AP-1:120.5:33").expect("valid placement");
        assert_eq!(ap.name, "AP-1");
        assert!((ap.x_px - 120.5).abs() < f64::EPSILON);
        assert!((ap.y_px - 33.0).abs() < f64::EPSILON);

        assert!(parse_ap("AP-1:120.5").is_err());
        assert!(parse_ap(":1:2").is_err());
        assert!(parse_ap("AP-1:x:2").is_err());
    }
}
