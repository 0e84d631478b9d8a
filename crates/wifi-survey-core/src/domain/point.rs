//! Spatial measurement points.

use serde::{Deserialize, Serialize};

use crate::domain::reading::NetworkReading;

/// Rounds a metric coordinate to the 2-decimal precision at which
/// measurement points are identified.
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// MeasurementPoint
// ---------------------------------------------------------------------------

/// One survey click: a metric position on the calibrated floor plan plus
/// the readings of every network visible there.
///
/// Points are owned exclusively by the
/// [`MeasurementStore`](crate::domain::store::MeasurementStore) and are
/// never mutated after insertion. The serialized `redes` field name is the
/// tool's session format for the reading list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Horizontal position in meters.
    pub x_m: f64,
    /// Vertical position in meters.
    pub y_m: f64,
    /// Readings captured at this position, in scanner order.
    #[serde(rename = "redes")]
    pub readings: Vec<NetworkReading>,
}

impl MeasurementPoint {
    /// Creates a point at the given metric position.
    #[must_use]
    pub fn new(x_m: f64, y_m: f64, readings: Vec<NetworkReading>) -> Self {
        Self { x_m, y_m, readings }
    }

    /// The store-identity key: both coordinates rounded to 2 decimal
    /// places and scaled to integers. Two points with the same key are
    /// the same survey spot.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_key(&self) -> (i64, i64) {
        let x = (self.x_m * 100.0).round() as i64;
        let y = (self.y_m * 100.0).round() as i64;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round_coordinate(1.234_56), 1.23);
        assert_eq!(round_coordinate(1.235), 1.24);
        assert_eq!(round_coordinate(-0.005), -0.01);
    }

    #[test]
    fn key_collides_at_two_decimals() {
        let a = MeasurementPoint::new(1.234, 5.678, Vec::new());
        let b = MeasurementPoint::new(1.23, 5.68, Vec::new());
        assert_eq!(a.rounded_key(), b.rounded_key());

        let c = MeasurementPoint::new(1.24, 5.68, Vec::new());
        assert_ne!(a.rounded_key(), c.rounded_key());
    }

    #[test]
    fn session_format_uses_redes() {
        let p = MeasurementPoint::new(1.0, 2.0, vec![NetworkReading::new("Net1", "aa", 50)]);
        let json = serde_json::to_string(&p).expect("serialize");
        assert!(json.contains("\"redes\""));
        assert!(json.contains("\"x_m\""));
        assert!(json.contains("\"y_m\""));
    }
}
