//! Signal-to-quality classification.
//!
//! [`classify`] maps a dBm value to a discrete quality tier, an estimated
//! link throughput, and the technology a link of that strength typically
//! sustains. The bands are the survey tool's fixed reference table; they
//! are deliberately coarse and exist to make heatmaps and reports readable
//! at a glance.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Threshold bands (inclusive lower bounds)
// ---------------------------------------------------------------------------

/// Signal at or above this is [`Tier::Excellent`].
pub const EXCELLENT_FLOOR_DBM: f64 = -50.0;
/// Signal at or above this is at least [`Tier::Good`].
pub const GOOD_FLOOR_DBM: f64 = -65.0;
/// Signal at or above this is at least [`Tier::Fair`].
pub const FAIR_FLOOR_DBM: f64 = -75.0;
/// Signal at or above this is at least [`Tier::Poor`]; anything weaker is
/// [`Tier::Critical`].
pub const POOR_FLOOR_DBM: f64 = -85.0;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Discrete signal-quality tier, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// At or above -50 dBm.
    Excellent,
    /// At or above -65 dBm.
    Good,
    /// At or above -75 dBm.
    Fair,
    /// At or above -85 dBm.
    Poor,
    /// Below -85 dBm.
    Critical,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The result of classifying one dBm value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Quality tier.
    pub tier: Tier,
    /// Estimated sustainable throughput in Mbps.
    pub estimated_mbps: f64,
    /// Technology a link of this strength typically negotiates.
    pub technology: &'static str,
}

/// Classifies a signal strength.
///
/// Total and deterministic over all inputs: every value lands in exactly
/// one band (a non-finite input falls through to [`Tier::Critical`]), and
/// the estimated throughput is weakly monotonic in signal strength.
#[must_use]
pub fn classify(dbm: f64) -> Classification {
    if dbm >= EXCELLENT_FLOOR_DBM {
        Classification {
            tier: Tier::Excellent,
            estimated_mbps: 400.0,
            technology: "802.11ac/n 5GHz",
        }
    } else if dbm >= GOOD_FLOOR_DBM {
        Classification {
            tier: Tier::Good,
            estimated_mbps: 100.0,
            technology: "802.11n/g",
        }
    } else if dbm >= FAIR_FLOOR_DBM {
        Classification {
            tier: Tier::Fair,
            estimated_mbps: 35.0,
            technology: "802.11g/b",
        }
    } else if dbm >= POOR_FLOOR_DBM {
        Classification {
            tier: Tier::Poor,
            estimated_mbps: 8.0,
            technology: "802.11b",
        }
    } else {
        Classification {
            tier: Tier::Critical,
            estimated_mbps: 0.5,
            technology: "no link",
        }
    }
}
