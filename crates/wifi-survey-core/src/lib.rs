//! # wifi-survey-core
//!
//! Spatial coverage engine for WiFi site surveys.
//!
//! The crate turns sparse, irregularly placed signal samples taken on a 2D
//! floor plan into a continuous estimate of coverage, usable both for
//! visualizing measured surveys and for projecting theoretical coverage
//! from planned access-point placements. It provides:
//!
//! - **Scale calibration**: [`ScaleCalibration`] ties floor-plan pixels to
//!   real-world meters from two reference clicks and a known distance.
//! - **Measurement storage**: [`MeasurementStore`] keeps an ordered,
//!   de-duplicated survey with per-network [`NetworkReading`]s, and
//!   round-trips the session JSON format exactly.
//! - **Coverage interpolation**: [`coverage`] produces smooth or per-cell
//!   [`CoverageSurface`]s from scattered samples in signal, SNR, or
//!   interference mode.
//! - **Propagation estimation**: [`propagation`] projects a free-space
//!   path-loss surface from [`AccessPoint`] placements alone.
//! - **Signal classification**: [`classify`](classify::classify) maps dBm
//!   to a quality tier and an estimated throughput.
//! - **Session orchestration**: [`SurveySession`] owns the survey state
//!   behind an explicit interaction-mode state machine.
//!
//! The engine is synchronous and single-threaded by design: every surface
//! is a pure computation over an immutable snapshot of the session, and
//! every returned [`CoverageSurface`] is a fresh, independently owned
//! value. Hosts that want responsiveness offload a call to a worker and
//! keep store mutation excluded while it runs.
//!
//! ## Example
//!
//! ```rust
//! use wifi_survey_core::prelude::*;
//!
//! let mut session = SurveySession::new(SurveyConfig::default());
//! session.set_calibration(ScaleCalibration::from_ratio(20.0)?);
//!
//! for (x, y, signal) in [(0.0, 0.0, 90), (200.0, 0.0, 60), (100.0, 150.0, 30)] {
//!     session.record_measurement(
//!         PixelPoint::new(x, y),
//!         vec![NetworkReading::new("Net1", "aa:bb:cc:dd:ee:ff", signal)],
//!     )?;
//! }
//!
//! let surface = session.measured_surface(
//!     "Net1",
//!     None,
//!     AnalysisMode::Signal,
//!     SurfaceStyle::PerCell,
//! )?;
//! assert_eq!(surface.shape(), (100, 100));
//! # Ok::<(), wifi_survey_core::SurveyError>(())
//! ```

#![forbid(unsafe_code)]

pub mod calibrate;
pub mod classify;
pub mod config;
pub mod coverage;
pub mod domain;
pub mod error;
pub mod propagation;
pub mod report;
pub mod session;

// Re-export commonly used types at the crate root.
pub use calibrate::{MeterPoint, PixelPoint, ScaleCalibration};
pub use classify::{classify, Classification, Tier};
pub use config::SurveyConfig;
pub use coverage::{
    AnalysisMode, CoverageSurface, FloorExtent, Sample, SurfaceStyle, SurfaceUnit,
};
pub use domain::{AccessPoint, Band, MeasurementPoint, MeasurementStore, NetworkReading};
pub use error::{SurveyError, SurveyResult};
pub use propagation::PixelExtent;
pub use report::{summarize, BandCounts, SsidSummary, TierCounts};
pub use session::{ClickOutcome, SurveyMode, SurveySession};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use wifi_survey_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::calibrate::{MeterPoint, PixelPoint, ScaleCalibration};
    pub use crate::classify::{classify, Classification, Tier};
    pub use crate::config::SurveyConfig;
    pub use crate::coverage::{
        AnalysisMode, CoverageSurface, FloorExtent, SurfaceStyle, SurfaceUnit,
    };
    pub use crate::domain::{
        AccessPoint, Band, MeasurementPoint, MeasurementStore, NetworkReading,
    };
    pub use crate::error::{SurveyError, SurveyResult};
    pub use crate::propagation::PixelExtent;
    pub use crate::report::{summarize, SsidSummary};
    pub use crate::session::{ClickOutcome, SurveyMode, SurveySession};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
