//! Theoretical coverage estimation from planned access-point placements.
//!
//! Independent of any measurement: given the calibrated floor plan and a
//! set of [`AccessPoint`] placements, the estimator computes a free-space
//! path-loss surface over the whole image. The model is deliberately
//! simple (no walls, no fading); it answers "where would a clear-air
//! signal still be usable" for placement planning, not prediction.

use ndarray::Array2;
use tracing::debug;

use crate::calibrate::ScaleCalibration;
use crate::config::SurveyConfig;
use crate::coverage::surface::{meshgrid, CoverageSurface, SurfaceUnit};
use crate::domain::ap::AccessPoint;
use crate::error::{SurveyError, SurveyResult};

// ---------------------------------------------------------------------------
// PixelExtent
// ---------------------------------------------------------------------------

/// The floor-plan image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelExtent {
    /// Image width in pixels.
    pub width_px: u32,
    /// Image height in pixels.
    pub height_px: u32,
}

impl PixelExtent {
    /// Creates an extent.
    #[must_use]
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

// ---------------------------------------------------------------------------
// estimate_coverage
// ---------------------------------------------------------------------------

/// Computes the free-space path-loss coverage surface for a set of access
/// points.
///
/// The grid steps over the image every
/// [`SurveyConfig::propagation_step_px`] pixels; the output axes are in
/// meters. Per cell and access point, the estimated signal is
/// `tx_power_dbm - 20 * log10(distance_m)` with the distance clamped to at
/// least 1 meter, so the logarithm never diverges next to an antenna. The
/// cell value is the maximum across access points, modeling a client that
/// associates with whichever radio is loudest, floored at the no-signal
/// clamp.
///
/// # Errors
///
/// - [`SurveyError::NoAccessPoints`] when `aps` is empty.
/// - [`SurveyError::Configuration`] when the extent has a zero dimension.
pub fn estimate_coverage(
    aps: &[AccessPoint],
    calibration: &ScaleCalibration,
    extent: PixelExtent,
    config: &SurveyConfig,
) -> SurveyResult<CoverageSurface> {
    if aps.is_empty() {
        return Err(SurveyError::NoAccessPoints);
    }
    if extent.width_px == 0 || extent.height_px == 0 {
        return Err(SurveyError::configuration(
            "floor-plan extent must be positive in both dimensions",
        ));
    }

    let step = f64::from(config.propagation_step_px);
    let xs_px: Vec<f64> = step_range(f64::from(extent.width_px), step);
    let ys_px: Vec<f64> = step_range(f64::from(extent.height_px), step);

    let xs_m: Vec<f64> = xs_px.iter().map(|&x| calibration.px_to_m(x)).collect();
    let ys_m: Vec<f64> = ys_px.iter().map(|&y| calibration.px_to_m(y)).collect();
    let (grid_x, grid_y) = meshgrid(&xs_m, &ys_m);

    let mut value = Array2::from_elem((ys_px.len(), xs_px.len()), config.clamp_dbm);
    for ap in aps {
        for ((i, j), cell) in value.indexed_iter_mut() {
            let dx_m = calibration.px_to_m(xs_px[j] - ap.x_px);
            let dy_m = calibration.px_to_m(ys_px[i] - ap.y_px);
            let distance_m = dx_m.hypot(dy_m).max(1.0);
            let rssi = config.tx_power_dbm - 20.0 * distance_m.log10();
            if rssi > *cell {
                *cell = rssi;
            }
        }
    }

    debug!(
        aps = aps.len(),
        cells = value.len(),
        "propagation surface estimated"
    );
    Ok(CoverageSurface::new(grid_x, grid_y, value, SurfaceUnit::Dbm))
}

/// Pixel positions `0, step, 2*step, ...` strictly below `limit`.
fn step_range(limit: f64, step: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut v = 0.0;
    while v < limit {
        out.push(v);
        v += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal10() -> ScaleCalibration {
        ScaleCalibration::from_ratio(10.0).expect("valid ratio")
    }

    #[test]
    fn no_access_points_is_an_error() {
        let result = estimate_coverage(
            &[],
            &cal10(),
            PixelExtent::new(100, 100),
            &SurveyConfig::default(),
        );
        assert!(matches!(result, Err(SurveyError::NoAccessPoints)));
    }

    #[test]
    fn near_field_is_clamped_to_one_meter() {
        let cfg = SurveyConfig::default();
        // AP exactly on a grid cell: distance 0 clamps to 1 m, giving the
        // raw reference power.
        let aps = vec![AccessPoint::new("AP-1", 100.0, 50.0)];
        let surface =
            estimate_coverage(&aps, &cal10(), PixelExtent::new(300, 200), &cfg).expect("surface");
        let at_ap = surface.nearest_value(10.0, 5.0).expect("grid cell");
        assert!((at_ap - cfg.tx_power_dbm).abs() < 1e-9);
    }

    #[test]
    fn grid_axes_are_metric() {
        let surface = estimate_coverage(
            &[AccessPoint::new("AP-1", 0.0, 0.0)],
            &cal10(),
            PixelExtent::new(200, 100),
            &SurveyConfig::default(),
        )
        .expect("surface");
        // 200 px at 10 px/m, sampled every 10 px: 0..=19 m in 1 m steps.
        let gx = surface.grid_x();
        assert_eq!(surface.shape(), (10, 20));
        assert!((gx[[0, 19]] - 19.0).abs() < 1e-9);
    }

    #[test]
    fn strongest_access_point_wins() {
        let cfg = SurveyConfig::default();
        let aps = vec![
            AccessPoint::new("near", 0.0, 0.0),
            AccessPoint::new("far", 200.0, 0.0),
        ];
        let surface =
            estimate_coverage(&aps, &cal10(), PixelExtent::new(300, 100), &cfg).expect("surface");

        // At the origin the near AP is at clamp distance (1 m) and the far
        // one is 20 m away; the cell must carry the near AP's value alone,
        // not an average.
        let origin = surface.nearest_value(0.0, 0.0).expect("grid cell");
        assert!((origin - cfg.tx_power_dbm).abs() < 1e-9);

        let far_alone = cfg.tx_power_dbm - 20.0 * 20.0_f64.log10();
        assert!(origin > far_alone + 20.0);
    }

    #[test]
    fn distant_cells_fall_off_at_twenty_db_per_decade() {
        let cfg = SurveyConfig::default();
        let aps = vec![AccessPoint::new("AP-1", 0.0, 0.0)];
        let surface =
            estimate_coverage(&aps, &cal10(), PixelExtent::new(1200, 100), &cfg).expect("surface");

        let at_10m = surface.nearest_value(10.0, 0.0).expect("grid cell");
        let at_100m = surface.nearest_value(100.0, 0.0).expect("grid cell");
        assert!((at_10m - (cfg.tx_power_dbm - 20.0)).abs() < 1e-9);
        assert!(((at_10m - at_100m) - 20.0).abs() < 1e-9);
    }
}
