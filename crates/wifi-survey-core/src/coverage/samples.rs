//! Sample extraction from the measurement store.
//!
//! Interpolation consumes plain `(x, y, value)` triples. This module
//! applies the per-mode extraction rule that derives them from stored
//! measurement points for a selected SSID and optional BSSID filter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SurveyConfig;
use crate::coverage::surface::SurfaceUnit;
use crate::domain::store::MeasurementStore;

// ---------------------------------------------------------------------------
// AnalysisMode
// ---------------------------------------------------------------------------

/// What quantity the surface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Average measured signal in dBm.
    Signal,
    /// Average measured signal relative to the configured noise floor, in
    /// dB.
    Snr,
    /// Count of readings from networks other than the selected SSID. The
    /// BSSID filter does not apply in this mode.
    Interference,
}

impl AnalysisMode {
    /// The unit the extracted values carry.
    #[must_use]
    pub fn unit(self) -> SurfaceUnit {
        match self {
            Self::Signal => SurfaceUnit::Dbm,
            Self::Snr => SurfaceUnit::DbRelative,
            Self::Interference => SurfaceUnit::Count,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal => write!(f, "signal"),
            Self::Snr => write!(f, "snr"),
            Self::Interference => write!(f, "interference"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One scattered input to the interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Horizontal position in meters.
    pub x_m: f64,
    /// Vertical position in meters.
    pub y_m: f64,
    /// Extracted value (unit depends on the analysis mode).
    pub value: f64,
}

// ---------------------------------------------------------------------------
// extract_samples
// ---------------------------------------------------------------------------

/// Derives interpolation samples from the store.
///
/// In [`AnalysisMode::Signal`] and [`AnalysisMode::Snr`], each point
/// contributes the average over its readings whose SSID matches `ssid`
/// (and whose BSSID matches `bssid`, when one is given); a point with no
/// matching reading is excluded entirely rather than treated as zero
/// signal. In [`AnalysisMode::Interference`], each point contributes the
/// count of readings whose SSID differs from `ssid` (hidden-network
/// readings count too), every point contributes, and `bssid` is ignored.
#[must_use]
pub fn extract_samples(
    store: &MeasurementStore,
    ssid: &str,
    bssid: Option<&str>,
    mode: AnalysisMode,
    config: &SurveyConfig,
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(store.len());

    for point in store.all() {
        let value = match mode {
            AnalysisMode::Interference => {
                #[allow(clippy::cast_precision_loss)]
                let count = point.readings.iter().filter(|r| r.ssid != ssid).count() as f64;
                Some(count)
            }
            AnalysisMode::Signal | AnalysisMode::Snr => {
                let matching: Vec<f64> = point
                    .readings
                    .iter()
                    .filter(|r| r.ssid == ssid && bssid.map_or(true, |b| r.bssid == b))
                    .map(|r| match mode {
                        AnalysisMode::Snr => r.dbm() - config.noise_floor_dbm,
                        _ => r.dbm(),
                    })
                    .collect();
                if matching.is_empty() {
                    None
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let mean = matching.iter().sum::<f64>() / matching.len() as f64;
                    Some(mean)
                }
            }
        };

        if let Some(value) = value {
            samples.push(Sample {
                x_m: point.x_m,
                y_m: point.y_m,
                value,
            });
        }
    }

    samples
}
