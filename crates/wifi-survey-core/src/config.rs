//! Engine configuration.
//!
//! [`SurveyConfig`] is the single source of truth for the tunable constants
//! of the coverage engine. The defaults reproduce the survey tool's
//! long-standing conventions (the assumed noise floor, the reference
//! transmit power, the no-signal clamp); they are conventions of the tool,
//! not calibrated physics, and are therefore exposed as named, overridable
//! fields rather than buried in the computation code.
//!
//! The struct is serializable via [`serde`] so a host application can store
//! it alongside a survey session.
//!
//! # Example
//!
//! ```rust
//! use wifi_survey_core::config::SurveyConfig;
//!
//! let cfg = SurveyConfig::default();
//! cfg.validate().expect("default config is valid");
//!
//! assert_eq!(cfg.noise_floor_dbm, -95.0);
//! assert_eq!(cfg.tx_power_dbm, -30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SurveyError, SurveyResult};

// ---------------------------------------------------------------------------
// SurveyConfig
// ---------------------------------------------------------------------------

/// Tunable constants for the coverage engine.
///
/// Use [`SurveyConfig::default()`] as a starting point, then override
/// individual fields as needed. Call [`SurveyConfig::validate()`] after
/// overriding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Assumed ambient noise floor in dBm, subtracted from measured signal
    /// in SNR mode. Default: **-95.0**.
    pub noise_floor_dbm: f64,

    /// Assumed transmit reference power in dBm at 1 meter, used by the
    /// free-space propagation estimate. Default: **-30.0**.
    pub tx_power_dbm: f64,

    /// Clamp value in dBm substituted for grid cells the interpolation
    /// leaves undefined ("no usable signal"). Also the floor of the
    /// propagation estimate. Default: **-100.0**.
    pub clamp_dbm: f64,

    /// Grid resolution per axis of the smoothed surface style, which spans
    /// the full calibrated floor extent. Default: **200**.
    pub smoothed_resolution: usize,

    /// Grid resolution per axis of the per-cell surface style, which spans
    /// the bounding box of the samples. Default: **100**.
    pub per_cell_resolution: usize,

    /// Pixel step of the propagation-estimate grid over the floor-plan
    /// image. Default: **10**.
    pub propagation_step_px: u32,

    /// Minimum number of distinct sample points required before any
    /// surface interpolation is attempted. Default: **3**.
    pub min_samples: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            noise_floor_dbm: -95.0,
            tx_power_dbm: -30.0,
            clamp_dbm: -100.0,
            smoothed_resolution: 200,
            per_cell_resolution: 100,
            propagation_step_px: 10,
            min_samples: 3,
        }
    }
}

impl SurveyConfig {
    /// Checks every field against its valid domain.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Configuration`] naming the first offending
    /// field.
    pub fn validate(&self) -> SurveyResult<()> {
        if !self.noise_floor_dbm.is_finite() {
            return Err(SurveyError::configuration("noise_floor_dbm must be finite"));
        }
        if !self.tx_power_dbm.is_finite() {
            return Err(SurveyError::configuration("tx_power_dbm must be finite"));
        }
        if !self.clamp_dbm.is_finite() {
            return Err(SurveyError::configuration("clamp_dbm must be finite"));
        }
        if self.smoothed_resolution < 2 {
            return Err(SurveyError::configuration(
                "smoothed_resolution must be at least 2",
            ));
        }
        if self.per_cell_resolution < 2 {
            return Err(SurveyError::configuration(
                "per_cell_resolution must be at least 2",
            ));
        }
        if self.propagation_step_px == 0 {
            return Err(SurveyError::configuration(
                "propagation_step_px must be at least 1",
            ));
        }
        if self.min_samples < 3 {
            return Err(SurveyError::configuration("min_samples must be at least 3"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SurveyConfig::default()
            .validate()
            .expect("default SurveyConfig must be valid");
    }

    #[test]
    fn default_values_match_tool_conventions() {
        let cfg = SurveyConfig::default();
        assert_eq!(cfg.noise_floor_dbm, -95.0);
        assert_eq!(cfg.tx_power_dbm, -30.0);
        assert_eq!(cfg.clamp_dbm, -100.0);
        assert_eq!(cfg.smoothed_resolution, 200);
        assert_eq!(cfg.per_cell_resolution, 100);
        assert_eq!(cfg.propagation_step_px, 10);
        assert_eq!(cfg.min_samples, 3);
    }

    #[test]
    fn rejects_zero_propagation_step() {
        let cfg = SurveyConfig {
            propagation_step_px: 0,
            ..SurveyConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SurveyError::Configuration { .. })
        ));
    }

    #[test]
    fn rejects_sub_minimum_sample_floor() {
        let cfg = SurveyConfig {
            min_samples: 2,
            ..SurveyConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_round_trip() {
        let cfg = SurveyConfig {
            noise_floor_dbm: -92.0,
            ..SurveyConfig::default()
        };
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: SurveyConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
