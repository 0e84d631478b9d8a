//! The Coverage Interpolator: turns scattered survey samples into a
//! continuous signal surface over a regular grid.

pub mod interpolate;
pub mod samples;
pub mod surface;

pub use interpolate::{per_cell_surface, smoothed_surface, FloorExtent, SurfaceStyle};
pub use samples::{extract_samples, AnalysisMode, Sample};
pub use surface::{CoverageSurface, SurfaceUnit};
