//! Access-point placements.

use serde::{Deserialize, Serialize};

use crate::calibrate::{MeterPoint, PixelPoint, ScaleCalibration};

/// A planned access-point placement on the floor-plan image.
///
/// Identity is the name; several placements may coexist. The position is
/// stored in pixel space and must be converted through a
/// [`ScaleCalibration`] before any metric computation. Placements are
/// append-only; repositioning is modeled as delete plus reinsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    /// Identifier chosen by the planner.
    pub name: String,
    /// Horizontal pixel position on the floor plan.
    pub x_px: f64,
    /// Vertical pixel position on the floor plan.
    pub y_px: f64,
}

impl AccessPoint {
    /// Creates a placement at the given pixel position.
    #[must_use]
    pub fn new(name: impl Into<String>, x_px: f64, y_px: f64) -> Self {
        Self {
            name: name.into(),
            x_px,
            y_px,
        }
    }

    /// The placement as a pixel point.
    #[must_use]
    pub fn position_px(&self) -> PixelPoint {
        PixelPoint::new(self.x_px, self.y_px)
    }

    /// The placement in meters under the given calibration.
    #[must_use]
    pub fn position_m(&self, calibration: &ScaleCalibration) -> MeterPoint {
        calibration.point_to_meters(self.position_px())
    }
}
