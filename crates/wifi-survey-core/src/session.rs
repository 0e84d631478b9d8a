//! Survey session orchestration.
//!
//! A [`SurveySession`] owns everything a survey accumulates: the scale
//! calibration, the measurement store, the access-point placements, the
//! floor-plan extent, and the engine configuration. Nothing here is
//! global; hosts create as many independent sessions as they like.
//!
//! User interaction is modeled as an explicit state machine. The session
//! is always in exactly one [`SurveyMode`]; discrete actions switch modes,
//! and a floor-plan click routes through [`SurveySession::handle_click`]
//! to a typed [`ClickOutcome`] instead of being interpreted by a tangle of
//! boolean flags. The engine itself stays mode-agnostic: the computation
//! entry points only ever receive already-validated coordinates and
//! distances.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::calibrate::{MeterPoint, PixelPoint, ScaleCalibration};
use crate::config::SurveyConfig;
use crate::coverage::interpolate::{
    per_cell_surface, smoothed_surface, FloorExtent, SurfaceStyle,
};
use crate::coverage::samples::{extract_samples, AnalysisMode};
use crate::coverage::surface::CoverageSurface;
use crate::domain::ap::AccessPoint;
use crate::domain::point::{round_coordinate, MeasurementPoint};
use crate::domain::reading::NetworkReading;
use crate::domain::store::MeasurementStore;
use crate::error::{SurveyError, SurveyResult};
use crate::propagation::{estimate_coverage, PixelExtent};

// ---------------------------------------------------------------------------
// SurveyMode
// ---------------------------------------------------------------------------

/// The session's current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurveyMode {
    /// Clicks are ignored.
    #[default]
    Idle,
    /// Clicks collect scale reference points.
    Calibrating,
    /// Clicks propose access-point sites.
    PlacingAp,
    /// Clicks propose measurement sites.
    Measuring,
}

impl fmt::Display for SurveyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Calibrating => write!(f, "calibrating"),
            Self::PlacingAp => write!(f, "placing-ap"),
            Self::Measuring => write!(f, "measuring"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClickOutcome
// ---------------------------------------------------------------------------

/// What a floor-plan click meant in the current mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The session is idle; nothing happened.
    Ignored,
    /// A scale reference point was stored. After the second one, call
    /// [`SurveySession::finish_calibration`] with the real distance.
    CalibrationPointStored {
        /// Reference points collected so far (1 or 2).
        collected: usize,
    },
    /// A site for an access point. The host should obtain a name and call
    /// [`SurveySession::place_ap`].
    ApSite(PixelPoint),
    /// A site for a measurement. The host should run a scan and call
    /// [`SurveySession::record_measurement`] with the readings.
    MeasurementSite {
        /// The clicked pixel position.
        pixel: PixelPoint,
        /// The same position in meters, rounded to the store's 2-decimal
        /// identity precision.
        position: MeterPoint,
    },
}

// ---------------------------------------------------------------------------
// SurveySession
// ---------------------------------------------------------------------------

/// One survey: calibration, measurements, AP placements, and the actions
/// that connect them.
#[derive(Debug, Default)]
pub struct SurveySession {
    config: SurveyConfig,
    mode: SurveyMode,
    calibration: Option<ScaleCalibration>,
    pending_scale: Vec<PixelPoint>,
    floor_px: Option<PixelExtent>,
    store: MeasurementStore,
    aps: Vec<AccessPoint>,
}

impl SurveySession {
    /// Creates an idle session with the given configuration.
    #[must_use]
    pub fn new(config: SurveyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    /// The current interaction mode.
    #[must_use]
    pub fn mode(&self) -> SurveyMode {
        self.mode
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    /// The current calibration, if one exists.
    #[must_use]
    pub fn calibration(&self) -> Option<&ScaleCalibration> {
        self.calibration.as_ref()
    }

    /// The measurement store.
    #[must_use]
    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    /// All access-point placements, in placement order.
    #[must_use]
    pub fn access_points(&self) -> &[AccessPoint] {
        &self.aps
    }

    /// Sets the floor-plan image size, enabling full-extent surfaces.
    pub fn set_floor_plan(&mut self, extent: PixelExtent) {
        self.floor_px = Some(extent);
    }

    // -----------------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------------

    /// Enters calibration mode. Any existing calibration is invalidated
    /// immediately; conversions fail until the new one is finished.
    pub fn begin_calibration(&mut self) {
        self.calibration = None;
        self.pending_scale.clear();
        self.mode = SurveyMode::Calibrating;
        debug!("calibration started; previous scale discarded");
    }

    /// Enters access-point placement mode.
    pub fn begin_ap_placement(&mut self) {
        self.pending_scale.clear();
        self.mode = SurveyMode::PlacingAp;
    }

    /// Enters measurement mode.
    pub fn begin_measuring(&mut self) {
        self.pending_scale.clear();
        self.mode = SurveyMode::Measuring;
    }

    /// Returns to idle, discarding any half-collected calibration clicks.
    pub fn cancel(&mut self) {
        self.pending_scale.clear();
        self.mode = SurveyMode::Idle;
    }

    /// Wipes the survey: mode, calibration, measurements, and placements.
    /// The floor-plan extent is kept; the plan itself did not change.
    pub fn reset(&mut self) {
        self.mode = SurveyMode::Idle;
        self.calibration = None;
        self.pending_scale.clear();
        self.store.clear();
        self.aps.clear();
        info!("session reset");
    }

    // -----------------------------------------------------------------------
    // Click routing
    // -----------------------------------------------------------------------

    /// Interprets a floor-plan click in the current mode.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Uncalibrated`] for a measurement-mode click
    /// before any calibration exists.
    pub fn handle_click(&mut self, pixel: PixelPoint) -> SurveyResult<ClickOutcome> {
        match self.mode {
            SurveyMode::Idle => Ok(ClickOutcome::Ignored),
            SurveyMode::Calibrating => {
                if self.pending_scale.len() < 2 {
                    self.pending_scale.push(pixel);
                }
                Ok(ClickOutcome::CalibrationPointStored {
                    collected: self.pending_scale.len(),
                })
            }
            SurveyMode::PlacingAp => Ok(ClickOutcome::ApSite(pixel)),
            SurveyMode::Measuring => {
                let calibration = self.calibration.ok_or(SurveyError::Uncalibrated)?;
                let raw = calibration.point_to_meters(pixel);
                let position =
                    MeterPoint::new(round_coordinate(raw.x), round_coordinate(raw.y));
                Ok(ClickOutcome::MeasurementSite { pixel, position })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Calibration
    // -----------------------------------------------------------------------

    /// Completes calibration from the two collected reference points and
    /// the real-world distance between them, returning the new
    /// pixels-per-meter ratio. Leaves calibration mode on success.
    ///
    /// # Errors
    ///
    /// - [`SurveyError::CalibrationPending`] with fewer than two collected
    ///   reference points.
    /// - [`SurveyError::InvalidCalibration`] for a non-positive distance
    ///   or coincident reference points; the session stays in calibration
    ///   mode so the user can retry.
    pub fn finish_calibration(&mut self, real_distance_m: f64) -> SurveyResult<f64> {
        if self.pending_scale.len() < 2 {
            return Err(SurveyError::CalibrationPending {
                collected: self.pending_scale.len(),
            });
        }
        let calibration = ScaleCalibration::from_reference(
            self.pending_scale[0],
            self.pending_scale[1],
            real_distance_m,
        )?;
        info!(
            pixels_per_meter = calibration.pixels_per_meter(),
            "scale calibrated"
        );
        self.calibration = Some(calibration);
        self.pending_scale.clear();
        self.mode = SurveyMode::Idle;
        Ok(calibration.pixels_per_meter())
    }

    /// Installs an externally-derived calibration, replacing any existing
    /// one. Useful for hosts that persist the scale between runs.
    pub fn set_calibration(&mut self, calibration: ScaleCalibration) {
        self.calibration = Some(calibration);
    }

    // -----------------------------------------------------------------------
    // Access points
    // -----------------------------------------------------------------------

    /// Places a named access point. Returns `false` if the name is taken;
    /// reposition by removing first.
    pub fn place_ap(&mut self, name: impl Into<String>, site: PixelPoint) -> bool {
        let name = name.into();
        if self.aps.iter().any(|ap| ap.name == name) {
            return false;
        }
        debug!(name = %name, x_px = site.x, y_px = site.y, "access point placed");
        self.aps.push(AccessPoint::new(name, site.x, site.y));
        true
    }

    /// Removes the access point with the given name. Returns `false` when
    /// no placement has that name.
    pub fn remove_ap(&mut self, name: &str) -> bool {
        let before = self.aps.len();
        self.aps.retain(|ap| ap.name != name);
        self.aps.len() != before
    }

    // -----------------------------------------------------------------------
    // Measurements
    // -----------------------------------------------------------------------

    /// Records a survey measurement at a floor-plan click.
    ///
    /// The pixel position is converted to meters and rounded to the
    /// store's 2-decimal identity; returns `false` when that spot is
    /// already measured (the readings are discarded, not merged).
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Uncalibrated`] before any calibration
    /// exists.
    pub fn record_measurement(
        &mut self,
        pixel: PixelPoint,
        readings: Vec<NetworkReading>,
    ) -> SurveyResult<bool> {
        let calibration = self.calibration.ok_or(SurveyError::Uncalibrated)?;
        let position = calibration.point_to_meters(pixel);
        let point = MeasurementPoint::new(
            round_coordinate(position.x),
            round_coordinate(position.y),
            readings,
        );
        Ok(self.store.add(point))
    }

    /// Distinct SSIDs seen so far, for selection menus.
    #[must_use]
    pub fn ssids(&self) -> std::collections::BTreeSet<String> {
        self.store.distinct_ssids()
    }

    /// Distinct BSSIDs observed for an SSID, for selection menus.
    #[must_use]
    pub fn bssids_for(&self, ssid: &str) -> std::collections::BTreeSet<String> {
        self.store.bssids_for(ssid)
    }

    // -----------------------------------------------------------------------
    // Surfaces
    // -----------------------------------------------------------------------

    /// Interpolates a measured coverage surface for an SSID.
    ///
    /// # Errors
    ///
    /// - [`SurveyError::InsufficientData`] when fewer than the configured
    ///   minimum of points carry usable samples.
    /// - [`SurveyError::Uncalibrated`] / [`SurveyError::FloorPlanUnset`]
    ///   for the smoothed style before the floor geometry is known.
    /// - [`SurveyError::InterpolationFailed`] on degenerate geometry.
    pub fn measured_surface(
        &self,
        ssid: &str,
        bssid: Option<&str>,
        mode: AnalysisMode,
        style: SurfaceStyle,
    ) -> SurveyResult<CoverageSurface> {
        let samples = extract_samples(&self.store, ssid, bssid, mode, &self.config);
        debug!(ssid, %mode, samples = samples.len(), "measured surface requested");
        match style {
            SurfaceStyle::PerCell => per_cell_surface(&samples, mode.unit(), &self.config),
            SurfaceStyle::Smoothed => {
                let calibration = self.calibration.ok_or(SurveyError::Uncalibrated)?;
                let floor = self.floor_px.ok_or(SurveyError::FloorPlanUnset)?;
                let extent =
                    FloorExtent::from_pixels(floor.width_px, floor.height_px, &calibration);
                smoothed_surface(&samples, &extent, mode.unit(), &self.config)
            }
        }
    }

    /// Estimates theoretical coverage from the placed access points.
    ///
    /// # Errors
    ///
    /// - [`SurveyError::Uncalibrated`] / [`SurveyError::FloorPlanUnset`]
    ///   before the floor geometry is known.
    /// - [`SurveyError::NoAccessPoints`] with zero placements.
    pub fn estimated_surface(&self) -> SurveyResult<CoverageSurface> {
        let calibration = self.calibration.ok_or(SurveyError::Uncalibrated)?;
        let floor = self.floor_px.ok_or(SurveyError::FloorPlanUnset)?;
        estimate_coverage(&self.aps, &calibration, floor, &self.config)
    }

    // -----------------------------------------------------------------------
    // Session files
    // -----------------------------------------------------------------------

    /// Exports the measurement store to the session JSON format.
    ///
    /// # Errors
    ///
    /// Propagates I/O and serialization failures.
    pub fn export_session(&self, path: impl AsRef<Path>) -> SurveyResult<()> {
        self.store.export_to(path)
    }

    /// Replaces the measurement store with the contents of a session
    /// file.
    ///
    /// # Errors
    ///
    /// Propagates I/O and serialization failures; the existing store is
    /// kept untouched on failure.
    pub fn import_session(&mut self, path: impl AsRef<Path>) -> SurveyResult<()> {
        self.store = MeasurementStore::import_from(path)?;
        Ok(())
    }
}
