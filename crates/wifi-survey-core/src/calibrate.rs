//! Floor-plan scale calibration.
//!
//! A survey starts by clicking two reference points on the floor-plan image
//! and entering the real-world distance between them. The resulting
//! [`ScaleCalibration`] is the pixels-per-meter ratio every downstream
//! spatial computation depends on.
//!
//! A calibration either exists and is valid, or does not exist at all: the
//! session holds an `Option<ScaleCalibration>`, and conversion attempts
//! without one fail with [`SurveyError::Uncalibrated`] rather than falling
//! back to a silent default. Each successful calibration fully replaces the
//! previous one; there is no smoothing or averaging across repeats.

use serde::{Deserialize, Serialize};

use crate::error::{SurveyError, SurveyResult};

// ---------------------------------------------------------------------------
// PixelPoint / MeterPoint -- value objects
// ---------------------------------------------------------------------------

/// A position on the floor-plan image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl PixelPoint {
    /// Creates a new pixel position.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pixel position, in pixels.
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A position on the calibrated floor plan, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterPoint {
    /// Horizontal coordinate in meters.
    pub x: f64,
    /// Vertical coordinate in meters.
    pub y: f64,
}

impl MeterPoint {
    /// Creates a new metric position.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// ScaleCalibration
// ---------------------------------------------------------------------------

/// A positive pixels-per-meter ratio tying the floor-plan image to
/// real-world distances.
///
/// Constructed only through [`ScaleCalibration::from_reference`] or
/// [`ScaleCalibration::from_ratio`], both of which enforce the
/// positive-and-finite invariant, so every held value is usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleCalibration {
    pixels_per_meter: f64,
}

impl ScaleCalibration {
    /// Derives a calibration from two reference clicks and the real-world
    /// distance between them.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::InvalidCalibration`] if `real_distance_m` is
    /// not a positive finite number, or if the two reference points
    /// coincide (a zero pixel distance cannot yield a positive ratio).
    pub fn from_reference(
        p1: PixelPoint,
        p2: PixelPoint,
        real_distance_m: f64,
    ) -> SurveyResult<Self> {
        let pixel_distance = p1.distance_to(p2);
        if real_distance_m <= 0.0 || !real_distance_m.is_finite() {
            return Err(SurveyError::InvalidCalibration {
                distance_m: real_distance_m,
                pixel_distance,
            });
        }
        Self::from_ratio(pixel_distance / real_distance_m).map_err(|_| {
            SurveyError::InvalidCalibration {
                distance_m: real_distance_m,
                pixel_distance,
            }
        })
    }

    /// Wraps an already-known pixels-per-meter ratio.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::InvalidCalibration`] if the ratio is not a
    /// positive finite number.
    pub fn from_ratio(pixels_per_meter: f64) -> SurveyResult<Self> {
        if pixels_per_meter <= 0.0 || !pixels_per_meter.is_finite() {
            return Err(SurveyError::InvalidCalibration {
                distance_m: 0.0,
                pixel_distance: pixels_per_meter,
            });
        }
        Ok(Self { pixels_per_meter })
    }

    /// The pixels-per-meter ratio.
    #[must_use]
    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// Converts a pixel length to meters.
    #[must_use]
    pub fn px_to_m(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_meter
    }

    /// Converts a metric length to pixels. Exact inverse of
    /// [`ScaleCalibration::px_to_m`] up to floating-point rounding.
    #[must_use]
    pub fn m_to_px(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }

    /// Converts a pixel position to a metric position.
    #[must_use]
    pub fn point_to_meters(&self, p: PixelPoint) -> MeterPoint {
        MeterPoint::new(self.px_to_m(p.x), self.px_to_m(p.y))
    }

    /// Converts a metric position back to a pixel position.
    #[must_use]
    pub fn point_to_pixels(&self, p: MeterPoint) -> PixelPoint {
        PixelPoint::new(self.m_to_px(p.x), self.m_to_px(p.y))
    }
}
