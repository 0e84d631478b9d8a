//! Error types for the WiFi site-survey coverage engine.
//!
//! This module is the single source of truth for all error types in the
//! crate. Every module that produces an error imports its error type from
//! here rather than defining it inline, keeping the error hierarchy
//! centralised and consistent.
//!
//! Every variant reflects a precondition the caller can resolve before
//! re-invoking (recalibrate, add more measurement points, place an access
//! point). The engine itself never retries and never terminates the host
//! process.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SurveyResult
// ---------------------------------------------------------------------------

/// A specialized `Result` type for coverage-engine operations.
pub type SurveyResult<T> = Result<T, SurveyError>;

// ---------------------------------------------------------------------------
// SurveyError
// ---------------------------------------------------------------------------

/// Top-level error type for the coverage engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurveyError {
    /// The calibration input cannot produce a positive pixels-per-meter
    /// ratio: the real-world distance is non-positive, or the two reference
    /// points coincide.
    #[error(
        "invalid calibration: {pixel_distance:.2} px over {distance_m} m does not \
         yield a positive pixels-per-meter ratio"
    )]
    InvalidCalibration {
        /// The real-world distance supplied by the caller, in meters.
        distance_m: f64,
        /// The Euclidean distance between the two reference clicks, in pixels.
        pixel_distance: f64,
    },

    /// A spatial conversion was attempted before any scale calibration
    /// exists.
    #[error("no scale calibration: calibrate the floor plan before converting coordinates")]
    Uncalibrated,

    /// Too few usable sample points for surface interpolation.
    #[error("insufficient samples for interpolation: need at least {required}, got {available}")]
    InsufficientData {
        /// Minimum number of sample points required.
        required: usize,
        /// Number of sample points actually available.
        available: usize,
    },

    /// The interpolation method produced no finite values at all.
    ///
    /// This is distinct from a surface whose undefined cells were replaced
    /// by the no-signal clamp value; that is a valid, if pessimistic,
    /// result.
    #[error("interpolation failed: {reason}")]
    InterpolationFailed {
        /// Human-readable description of the numerical failure.
        reason: String,
    },

    /// Propagation estimation was requested with zero access points placed.
    #[error("no access points placed; cannot estimate coverage")]
    NoAccessPoints,

    /// Calibration was finalised before both reference points were
    /// collected.
    #[error("calibration pending: {collected} of 2 reference points collected")]
    CalibrationPending {
        /// Number of reference clicks collected so far.
        collected: usize,
    },

    /// A full-extent surface was requested before the floor-plan pixel
    /// extent was set.
    #[error("floor plan extent is unset; load a floor plan before requesting a full-extent surface")]
    FloorPlanUnset,

    /// A configuration value is out of its valid domain.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Description of the offending value.
        message: String,
    },

    /// JSON (de)serialization error on the session import/export path.
    #[error("session serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error on the session import/export path.
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SurveyError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new interpolation-failure error.
    #[must_use]
    pub fn interpolation_failed(reason: impl Into<String>) -> Self {
        Self::InterpolationFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error reflects a violated precondition the
    /// caller can resolve by changing inputs (as opposed to an I/O or
    /// serialization failure outside the engine's control).
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::InvalidCalibration { .. }
            | Self::Uncalibrated
            | Self::InsufficientData { .. }
            | Self::InterpolationFailed { .. }
            | Self::NoAccessPoints
            | Self::CalibrationPending { .. }
            | Self::FloorPlanUnset
            | Self::Configuration { .. } => true,
            Self::Json(_) | Self::Io(_) => false,
        }
    }
}
