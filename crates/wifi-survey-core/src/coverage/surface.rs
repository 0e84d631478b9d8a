//! Coverage surfaces over regular grids.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SurfaceUnit
// ---------------------------------------------------------------------------

/// The unit of a surface's cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceUnit {
    /// Absolute signal power in dBm.
    Dbm,
    /// Signal relative to the configured noise floor, in dB.
    DbRelative,
    /// Unitless count of interfering readings.
    Count,
}

// ---------------------------------------------------------------------------
// CoverageSurface
// ---------------------------------------------------------------------------

/// A signal surface sampled on a regular grid.
///
/// `grid_x` and `grid_y` hold the metric coordinates of every cell in the
/// meshgrid convention: rows follow the y axis, columns follow the x axis,
/// so all three arrays share the shape `(ny, nx)`. A surface is produced
/// fresh per request and never mutated after return; every undefined cell
/// has already been replaced by the engine's clamp value, so renderers
/// never see numeric holes.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSurface {
    grid_x: Array2<f64>,
    grid_y: Array2<f64>,
    value: Array2<f64>,
    unit: SurfaceUnit,
}

impl CoverageSurface {
    pub(crate) fn new(
        grid_x: Array2<f64>,
        grid_y: Array2<f64>,
        value: Array2<f64>,
        unit: SurfaceUnit,
    ) -> Self {
        debug_assert_eq!(grid_x.dim(), value.dim());
        debug_assert_eq!(grid_y.dim(), value.dim());
        Self {
            grid_x,
            grid_y,
            value,
            unit,
        }
    }

    /// Cell x coordinates in meters, shape `(ny, nx)`.
    #[must_use]
    pub fn grid_x(&self) -> &Array2<f64> {
        &self.grid_x
    }

    /// Cell y coordinates in meters, shape `(ny, nx)`.
    #[must_use]
    pub fn grid_y(&self) -> &Array2<f64> {
        &self.grid_y
    }

    /// Cell values, shape `(ny, nx)`.
    #[must_use]
    pub fn value(&self) -> &Array2<f64> {
        &self.value
    }

    /// The unit of the cell values.
    #[must_use]
    pub fn unit(&self) -> SurfaceUnit {
        self.unit
    }

    /// Grid shape as `(ny, nx)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.value.dim()
    }

    /// The value of the cell nearest to the given metric position, or
    /// `None` for an empty grid.
    ///
    /// Grids are regular, so the nearest cell is found independently per
    /// axis.
    #[must_use]
    pub fn nearest_value(&self, x_m: f64, y_m: f64) -> Option<f64> {
        let (ny, nx) = self.shape();
        if nx == 0 || ny == 0 {
            return None;
        }
        let col = nearest_index(&self.grid_x.row(0).to_vec(), x_m);
        let row = nearest_index(&self.grid_y.column(0).to_vec(), y_m);
        Some(self.value[[row, col]])
    }
}

fn nearest_index(axis: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &v) in axis.iter().enumerate() {
        let d = (v - target).abs();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Grid construction helpers
// ---------------------------------------------------------------------------

/// `n` evenly spaced values from `start` to `stop` inclusive.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Expands axis vectors into coordinate matrices of shape `(ys.len(),
/// xs.len())`.
pub(crate) fn meshgrid(xs: &[f64], ys: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let grid_x = Array2::from_shape_fn((ys.len(), xs.len()), |(_, j)| xs[j]);
    let grid_y = Array2::from_shape_fn((ys.len(), xs.len()), |(i, _)| ys[i]);
    (grid_x, grid_y)
}
