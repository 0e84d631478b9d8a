//! The measurement store.
//!
//! The store is the aggregate root for survey data: an ordered,
//! append-only collection of [`MeasurementPoint`]s with a de-duplication
//! guarantee, plus the derived read views the selection menus are built
//! from. It also owns the one on-disk format of the engine, a JSON array
//! of points that must round-trip exactly.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::point::MeasurementPoint;
use crate::error::SurveyResult;

// ---------------------------------------------------------------------------
// MeasurementStore
// ---------------------------------------------------------------------------

/// Ordered, de-duplicated collection of survey measurement points.
///
/// Insertion order is preserved; it carries no interpolation semantics but
/// keeps plots and legend entries reproducible across runs. Points are
/// appended, never mutated; the whole store is cleared only on session
/// reset.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    points: Vec<MeasurementPoint>,
    occupied: HashSet<(i64, i64)>,
}

impl MeasurementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point unless its coordinates, rounded to 2 decimal
    /// places, are already occupied.
    ///
    /// Returns `false` without modifying the store when the spot is taken;
    /// repeated clicks at the same place never inflate sample density.
    /// Duplicates are rejected, not merged.
    pub fn add(&mut self, point: MeasurementPoint) -> bool {
        let key = point.rounded_key();
        if !self.occupied.insert(key) {
            debug!(x_m = point.x_m, y_m = point.y_m, "duplicate measurement spot rejected");
            return false;
        }
        debug!(
            x_m = point.x_m,
            y_m = point.y_m,
            readings = point.readings.len(),
            "measurement recorded"
        );
        self.points.push(point);
        true
    }

    /// Read-only view of all points in insertion order.
    #[must_use]
    pub fn all(&self) -> &[MeasurementPoint] {
        &self.points
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Empties the store. Used on session reset.
    pub fn clear(&mut self) {
        self.points.clear();
        self.occupied.clear();
    }

    /// Every distinct non-empty SSID seen across all readings, sorted.
    #[must_use]
    pub fn distinct_ssids(&self) -> BTreeSet<String> {
        self.points
            .iter()
            .flat_map(|p| p.readings.iter())
            .filter(|r| !r.ssid.trim().is_empty())
            .map(|r| r.ssid.clone())
            .collect()
    }

    /// Every distinct non-empty BSSID observed for the given SSID, sorted.
    #[must_use]
    pub fn bssids_for(&self, ssid: &str) -> BTreeSet<String> {
        self.points
            .iter()
            .flat_map(|p| p.readings.iter())
            .filter(|r| r.ssid == ssid && !r.bssid.trim().is_empty())
            .map(|r| r.bssid.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Session format
    // -----------------------------------------------------------------------

    /// Serializes the point list to the session JSON format.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Json`](crate::error::SurveyError::Json) on
    /// serialization failure.
    pub fn to_json(&self) -> SurveyResult<String> {
        Ok(serde_json::to_string_pretty(&self.points)?)
    }

    /// Reconstructs a store from the session JSON format.
    ///
    /// The reconstructed `all()` sequence is element-wise equal to the
    /// exported one. Points whose rounded coordinates collide with an
    /// earlier entry in the file are skipped with a warning; exported
    /// files never contain such collisions.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Json`](crate::error::SurveyError::Json) when
    /// the input is not a valid session document.
    pub fn from_json(json: &str) -> SurveyResult<Self> {
        let points: Vec<MeasurementPoint> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for point in points {
            let (x_m, y_m) = (point.x_m, point.y_m);
            if !store.add(point) {
                warn!(x_m, y_m, "skipping duplicate point in session file");
            }
        }
        Ok(store)
    }

    /// Writes the session format to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Io`](crate::error::SurveyError::Io) or
    /// [`SurveyError::Json`](crate::error::SurveyError::Json).
    pub fn export_to(&self, path: impl AsRef<Path>) -> SurveyResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), points = self.len(), "session exported");
        Ok(())
    }

    /// Reads a store back from a session file.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Io`](crate::error::SurveyError::Io) or
    /// [`SurveyError::Json`](crate::error::SurveyError::Json).
    pub fn import_from(path: impl AsRef<Path>) -> SurveyResult<Self> {
        let path = path.as_ref();
        let store = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), points = store.len(), "session imported");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::NetworkReading;

    fn point(x: f64, y: f64) -> MeasurementPoint {
        MeasurementPoint::new(x, y, vec![NetworkReading::new("Net1", "aa:bb", 60)])
    }

    #[test]
    fn add_rejects_duplicates_at_two_decimals() {
        let mut store = MeasurementStore::new();
        assert!(store.add(point(1.234, 2.0)));
        // Rounds to the same (1.23, 2.00) spot.
        assert!(!store.add(point(1.23, 2.001)));
        assert_eq!(store.len(), 1);

        assert!(store.add(point(1.24, 2.0)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = MeasurementStore::new();
        store.add(point(3.0, 0.0));
        store.add(point(1.0, 0.0));
        store.add(point(2.0, 0.0));
        let xs: Vec<f64> = store.all().iter().map(|p| p.x_m).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn derived_views_ignore_empty_identifiers() {
        let mut store = MeasurementStore::new();
        store.add(MeasurementPoint::new(
            0.0,
            0.0,
            vec![
                NetworkReading::new("Net1", "aa:aa", 50),
                NetworkReading::new("Net1", "bb:bb", 40),
                NetworkReading::new("", "cc:cc", 30),
                NetworkReading::new("   ", "dd:dd", 20),
                NetworkReading::new("Net2", "", 10),
            ],
        ));

        let distinct = store.distinct_ssids();
        let ssids: Vec<&str> = distinct.iter().map(String::as_str).collect();
        assert_eq!(ssids, vec!["Net1", "Net2"]);

        let bssids: Vec<String> = store.bssids_for("Net1").into_iter().collect();
        assert_eq!(bssids, vec!["aa:aa".to_owned(), "bb:bb".to_owned()]);
        assert!(store.bssids_for("Net2").is_empty());
    }

    #[test]
    fn clear_empties_and_reopens_spots() {
        let mut store = MeasurementStore::new();
        store.add(point(1.0, 1.0));
        store.clear();
        assert!(store.is_empty());
        assert!(store.add(point(1.0, 1.0)));
    }

    #[test]
    fn json_round_trip_is_element_wise_equal() {
        let mut store = MeasurementStore::new();
        store.add(MeasurementPoint::new(
            1.25,
            0.5,
            vec![NetworkReading::new("Net1", "aa:bb", 77).with_channel("11")],
        ));
        store.add(MeasurementPoint::new(2.0, 3.75, Vec::new()));

        let json = store.to_json().expect("export");
        let back = MeasurementStore::from_json(&json).expect("import");
        assert_eq!(back.all(), store.all());
    }

    #[test]
    fn reads_legacy_session_documents() {
        // A file written by the original survey tool.
        let json = r#"[
            {
                "x_m": 3.19,
                "y_m": 2.56,
                "redes": [
                    {"SSID": "Oficina", "BSSID": "aa:bb:cc:dd:ee:ff", "Señal": 84, "Canal": "11"},
                    {"SSID": "Vecino", "BSSID": "11:22:33:44:55:66", "Señal": 40, "Canal": "N/A"}
                ]
            }
        ]"#;
        let store = MeasurementStore::from_json(json).expect("legacy import");
        assert_eq!(store.len(), 1);
        let p = &store.all()[0];
        assert_eq!(p.readings.len(), 2);
        assert_eq!(p.readings[0].ssid, "Oficina");
        assert_eq!(p.readings[1].signal_raw, 40);
        assert_eq!(p.readings[1].channel.as_deref(), Some("N/A"));
    }
}
