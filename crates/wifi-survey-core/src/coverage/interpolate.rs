//! Scattered-data interpolation over a regular grid.
//!
//! Both surface styles triangulate the samples (Delaunay) and evaluate an
//! interpolant at every grid cell:
//!
//! - [`smoothed_surface`] spans the full calibrated floor extent at a
//!   resolution independent of sample density and uses Sibson's C1
//!   natural-neighbor interpolant with least-squares estimated vertex
//!   gradients.
//! - [`per_cell_surface`] spans only the bounding box of the samples and
//!   uses plain barycentric (linear) interpolation.
//!
//! The two styles are intentionally different fidelity/extent trade-offs,
//! not equivalent views of the same surface.
//!
//! Outside the convex hull of the samples the interpolant is undefined;
//! those cells are replaced with the configured no-signal clamp before the
//! surface is returned, so callers never see numeric holes. A grid with no
//! finite cell at all (degenerate sample geometry) is an error, not a
//! clamped surface.

use spade::{
    DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation,
};
use tracing::debug;

use crate::calibrate::ScaleCalibration;
use crate::config::SurveyConfig;
use crate::coverage::samples::Sample;
use crate::coverage::surface::{linspace, meshgrid, CoverageSurface, SurfaceUnit};
use crate::error::{SurveyError, SurveyResult};

/// Flatness parameter of the C1 natural-neighbor interpolant. Larger
/// values pull the surface toward the flat (C0) estimate near vertices.
const GRADIENT_FLATNESS: f64 = 1.0;

// ---------------------------------------------------------------------------
// SurfaceStyle / FloorExtent
// ---------------------------------------------------------------------------

/// Which fidelity/extent trade-off to interpolate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStyle {
    /// Smooth surface over the full floor extent.
    Smoothed,
    /// Linear surface over the sample bounding box.
    PerCell,
}

/// The calibrated metric extent of the floor plan, spanned by the
/// smoothed surface style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorExtent {
    /// Floor-plan width in meters.
    pub width_m: f64,
    /// Floor-plan height in meters.
    pub height_m: f64,
}

impl FloorExtent {
    /// Derives the metric extent from the floor-plan image size.
    #[must_use]
    pub fn from_pixels(width_px: u32, height_px: u32, calibration: &ScaleCalibration) -> Self {
        Self {
            width_m: calibration.px_to_m(f64::from(width_px)),
            height_m: calibration.px_to_m(f64::from(height_px)),
        }
    }
}

// ---------------------------------------------------------------------------
// Triangulation plumbing
// ---------------------------------------------------------------------------

struct SamplePoint {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for SamplePoint {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

fn build_triangulation(
    samples: &[Sample],
    config: &SurveyConfig,
) -> SurveyResult<DelaunayTriangulation<SamplePoint>> {
    if samples.len() < config.min_samples {
        return Err(SurveyError::InsufficientData {
            required: config.min_samples,
            available: samples.len(),
        });
    }

    let mut triangulation = DelaunayTriangulation::new();
    for sample in samples {
        triangulation
            .insert(SamplePoint {
                position: Point2::new(sample.x_m, sample.y_m),
                value: sample.value,
            })
            .map_err(|e| SurveyError::interpolation_failed(format!("bad sample position: {e}")))?;
    }

    // Distinct points that all fall on one line triangulate to zero inner
    // faces and support no interpolation anywhere.
    if triangulation.num_inner_faces() == 0 {
        return Err(SurveyError::interpolation_failed(
            "sample points are collinear; the surface is undefined everywhere",
        ));
    }

    Ok(triangulation)
}

/// Per-vertex gradient estimates for the C1 interpolant: a weighted
/// least-squares plane fit over each vertex's Delaunay neighbors, indexed
/// by vertex index. Vertices with degenerate neighborhoods keep a zero
/// gradient, which degrades locally to the C0 estimate.
fn estimate_gradients(triangulation: &DelaunayTriangulation<SamplePoint>) -> Vec<[f64; 2]> {
    let mut gradients = vec![[0.0, 0.0]; triangulation.num_vertices()];

    for vertex in triangulation.vertices() {
        let p = vertex.position();
        let z = vertex.data().value;

        let (mut sxx, mut sxy, mut syy, mut sxz, mut syz) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for edge in vertex.out_edges() {
            let neighbor = edge.to();
            let q = neighbor.position();
            let dx = q.x - p.x;
            let dy = q.y - p.y;
            let dz = neighbor.data().value - z;
            let weight = 1.0 / (dx * dx + dy * dy).max(f64::EPSILON);
            sxx += weight * dx * dx;
            sxy += weight * dx * dy;
            syy += weight * dy * dy;
            sxz += weight * dx * dz;
            syz += weight * dy * dz;
        }

        let det = sxx * syy - sxy * sxy;
        if det.abs() > 1e-12 {
            gradients[vertex.fix().index()] = [
                (syy * sxz - sxy * syz) / det,
                (sxx * syz - sxy * sxz) / det,
            ];
        }
    }

    gradients
}

// ---------------------------------------------------------------------------
// Surface construction
// ---------------------------------------------------------------------------

/// Interpolates a smooth surface over the full floor extent.
///
/// The grid resolution comes from
/// [`SurveyConfig::smoothed_resolution`] and is independent of sample
/// density.
///
/// # Errors
///
/// - [`SurveyError::InsufficientData`] with fewer than
///   [`SurveyConfig::min_samples`] samples.
/// - [`SurveyError::InterpolationFailed`] when the samples are degenerate
///   and no grid cell receives a finite value.
pub fn smoothed_surface(
    samples: &[Sample],
    extent: &FloorExtent,
    unit: SurfaceUnit,
    config: &SurveyConfig,
) -> SurveyResult<CoverageSurface> {
    let triangulation = build_triangulation(samples, config)?;
    let gradients = estimate_gradients(&triangulation);
    let interpolator = triangulation.natural_neighbor();

    let xs = linspace(0.0, extent.width_m, config.smoothed_resolution);
    let ys = linspace(0.0, extent.height_m, config.smoothed_resolution);

    finalize_surface(
        &xs,
        &ys,
        unit,
        config,
        |x, y| {
            interpolator.interpolate_gradient(
                |v| v.data().value,
                |v| gradients[v.fix().index()],
                GRADIENT_FLATNESS,
                Point2::new(x, y),
            )
        },
    )
}

/// Interpolates a linear surface over the bounding box of the samples.
///
/// The grid resolution comes from [`SurveyConfig::per_cell_resolution`].
///
/// # Errors
///
/// Same failure modes as [`smoothed_surface`].
pub fn per_cell_surface(
    samples: &[Sample],
    unit: SurfaceUnit,
    config: &SurveyConfig,
) -> SurveyResult<CoverageSurface> {
    let triangulation = build_triangulation(samples, config)?;
    let interpolator = triangulation.barycentric();

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in samples {
        min_x = min_x.min(s.x_m);
        max_x = max_x.max(s.x_m);
        min_y = min_y.min(s.y_m);
        max_y = max_y.max(s.y_m);
    }

    let xs = linspace(min_x, max_x, config.per_cell_resolution);
    let ys = linspace(min_y, max_y, config.per_cell_resolution);

    finalize_surface(&xs, &ys, unit, config, |x, y| {
        interpolator.interpolate(|v| v.data().value, Point2::new(x, y))
    })
}

/// Evaluates the interpolant over the grid, replaces undefined cells with
/// the clamp value, and rejects an entirely undefined result.
fn finalize_surface(
    xs: &[f64],
    ys: &[f64],
    unit: SurfaceUnit,
    config: &SurveyConfig,
    interpolate_at: impl Fn(f64, f64) -> Option<f64>,
) -> SurveyResult<CoverageSurface> {
    let (grid_x, grid_y) = meshgrid(xs, ys);
    let mut value = ndarray::Array2::from_elem((ys.len(), xs.len()), config.clamp_dbm);

    let mut finite_cells = 0usize;
    for ((i, j), cell) in value.indexed_iter_mut() {
        if let Some(v) = interpolate_at(xs[j], ys[i]) {
            if v.is_finite() {
                *cell = v;
                finite_cells += 1;
            }
        }
    }

    if finite_cells == 0 {
        return Err(SurveyError::interpolation_failed(
            "interpolation produced no finite values",
        ));
    }

    debug!(
        finite_cells,
        clamped_cells = value.len() - finite_cells,
        "surface interpolated"
    );
    Ok(CoverageSurface::new(grid_x, grid_y, value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64, value: f64) -> Sample {
        Sample { x_m: x, y_m: y, value }
    }

    #[test]
    fn too_few_samples_is_insufficient_data() {
        let cfg = SurveyConfig::default();
        for n in 0..3 {
            let samples: Vec<Sample> = (0..n)
                .map(|i| sample(f64::from(i), f64::from(i * i), -60.0))
                .collect();
            let result = per_cell_surface(&samples, SurfaceUnit::Dbm, &cfg);
            assert!(
                matches!(
                    result,
                    Err(SurveyError::InsufficientData { required: 3, available }) if available == n as usize
                ),
                "{n} samples must be rejected"
            );
        }
    }

    #[test]
    fn three_non_collinear_samples_succeed() {
        let cfg = SurveyConfig::default();
        let samples = vec![
            sample(0.0, 0.0, -50.0),
            sample(4.0, 0.0, -70.0),
            sample(2.0, 3.0, -60.0),
        ];
        let surface =
            per_cell_surface(&samples, SurfaceUnit::Dbm, &cfg).expect("triangle interpolates");
        assert_eq!(surface.shape(), (100, 100));
        assert!(surface.value().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn collinear_samples_fail_interpolation() {
        let cfg = SurveyConfig::default();
        let samples = vec![
            sample(0.0, 1.0, -50.0),
            sample(1.0, 2.0, -60.0),
            sample(2.0, 3.0, -70.0),
            sample(3.0, 4.0, -80.0),
        ];
        let result = per_cell_surface(&samples, SurfaceUnit::Dbm, &cfg);
        assert!(matches!(result, Err(SurveyError::InterpolationFailed { .. })));
    }

    #[test]
    fn hull_exterior_is_clamped() {
        let cfg = SurveyConfig::default();
        // A triangle leaves the bounding-box corners outside its hull.
        let samples = vec![
            sample(0.0, 0.0, -50.0),
            sample(10.0, 0.0, -60.0),
            sample(5.0, 10.0, -55.0),
        ];
        let surface =
            per_cell_surface(&samples, SurfaceUnit::Dbm, &cfg).expect("triangle interpolates");
        // Top-left bounding-box corner (x=0, y=10) is far outside the hull.
        let corner = surface.nearest_value(0.0, 10.0).expect("grid cell");
        assert!((corner - cfg.clamp_dbm).abs() < f64::EPSILON);
        // The centroid is well inside and must be interpolated, not clamped.
        let center = surface.nearest_value(5.0, 3.0).expect("grid cell");
        assert!(center > cfg.clamp_dbm);
    }

    #[test]
    fn smoothed_surface_spans_the_floor_extent() {
        let cfg = SurveyConfig::default();
        let samples = vec![
            sample(2.0, 2.0, -50.0),
            sample(6.0, 2.0, -60.0),
            sample(4.0, 5.0, -55.0),
        ];
        let extent = FloorExtent {
            width_m: 20.0,
            height_m: 10.0,
        };
        let surface = smoothed_surface(&samples, &extent, SurfaceUnit::Dbm, &cfg)
            .expect("smoothed surface");
        assert_eq!(surface.shape(), (200, 200));
        let gx = surface.grid_x();
        assert!((gx[[0, 199]] - 20.0).abs() < 1e-9);
        let gy = surface.grid_y();
        assert!((gy[[199, 0]] - 10.0).abs() < 1e-9);
        // Far corner of the floor is outside the hull and clamped.
        let corner = surface.nearest_value(19.9, 9.9).expect("grid cell");
        assert!((corner - cfg.clamp_dbm).abs() < f64::EPSILON);
    }

    #[test]
    fn interior_values_stay_within_sample_range_for_linear_style() {
        let cfg = SurveyConfig::default();
        let samples = vec![
            sample(0.0, 0.0, -80.0),
            sample(8.0, 0.0, -40.0),
            sample(4.0, 6.0, -60.0),
            sample(4.0, 2.0, -55.0),
        ];
        let surface =
            per_cell_surface(&samples, SurfaceUnit::Dbm, &cfg).expect("surface");
        for &v in surface.value() {
            let clamped = (v - cfg.clamp_dbm).abs() < f64::EPSILON;
            assert!(
                clamped || (-80.0..=-40.0).contains(&v),
                "barycentric value {v} escapes the sample range"
            );
        }
    }
}
