//! Per-network scan readings.
//!
//! A [`NetworkReading`] is one network observed once by the platform
//! scanner at one survey point. The scanner's raw output format is not
//! parsed here; collaborators hand the engine already-structured records.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NetworkReading -- value object
// ---------------------------------------------------------------------------

/// A single observation of a network from a WiFi scan.
///
/// `signal_raw` is the scanner's native unit (a percentage on most
/// platforms). The serialized field names mirror the survey tool's
/// long-standing session format, so session files written by earlier
/// versions of the tool re-load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkReading {
    /// The network name. May be empty for hidden networks.
    #[serde(rename = "SSID")]
    pub ssid: String,

    /// The hardware identifier of the specific radio within the SSID.
    #[serde(rename = "BSSID")]
    pub bssid: String,

    /// Raw scanner signal unit (typically 0-100 percent).
    #[serde(rename = "Señal")]
    pub signal_raw: i32,

    /// The reported channel, as a free-form string, when the scanner
    /// provides one.
    #[serde(rename = "Canal", default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl NetworkReading {
    /// Creates a reading without channel information.
    #[must_use]
    pub fn new(ssid: impl Into<String>, bssid: impl Into<String>, signal_raw: i32) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
            signal_raw,
            channel: None,
        }
    }

    /// Attaches a channel string to the reading.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Approximate received power in dBm.
    ///
    /// Uses the tool's linear convention `dBm = signal_raw / 2 - 100`,
    /// matching the mapping used by the Windows WLAN API. It is a
    /// documented approximation, not a physical law; callers must not
    /// assume it matches true received power outside this convention.
    #[must_use]
    pub fn dbm(&self) -> f64 {
        f64::from(self.signal_raw) / 2.0 - 100.0
    }

    /// The frequency band inferred from the channel string.
    #[must_use]
    pub fn band(&self) -> Band {
        Band::from_channel_str(self.channel.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Band -- value object
// ---------------------------------------------------------------------------

/// The WiFi frequency band a reading was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 2.4 GHz (channels 1-14)
    Band2_4GHz,
    /// 5 GHz (channels 36-165)
    Band5GHz,
    /// The scanner did not report a parseable channel.
    Unknown,
}

impl Band {
    /// Infers the band from a scanner-reported channel string.
    ///
    /// Non-numeric strings (including the scanner's "N/A" placeholder) and
    /// out-of-range channel numbers yield [`Band::Unknown`].
    #[must_use]
    pub fn from_channel_str(channel: Option<&str>) -> Self {
        let Some(parsed) = channel.and_then(|c| c.trim().parse::<u16>().ok()) else {
            return Self::Unknown;
        };
        match parsed {
            1..=14 => Self::Band2_4GHz,
            36..=165 => Self::Band5GHz,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Band2_4GHz => write!(f, "2.4 GHz"),
            Self::Band5GHz => write!(f, "5 GHz"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dbm_conversion_endpoints() {
        // 100% -> -50 dBm, 0% -> -100 dBm.
        assert!((NetworkReading::new("a", "b", 100).dbm() - (-50.0)).abs() < f64::EPSILON);
        assert!((NetworkReading::new("a", "b", 0).dbm() - (-100.0)).abs() < f64::EPSILON);
        // Odd raw values land on half-dBm steps.
        assert!((NetworkReading::new("a", "b", 61).dbm() - (-69.5)).abs() < f64::EPSILON);
    }

    #[test]
    fn band_from_channel() {
        assert_eq!(Band::from_channel_str(Some("6")), Band::Band2_4GHz);
        assert_eq!(Band::from_channel_str(Some("14")), Band::Band2_4GHz);
        assert_eq!(Band::from_channel_str(Some("36")), Band::Band5GHz);
        assert_eq!(Band::from_channel_str(Some("149")), Band::Band5GHz);
        assert_eq!(Band::from_channel_str(Some("N/A")), Band::Unknown);
        assert_eq!(Band::from_channel_str(Some("20")), Band::Unknown);
        assert_eq!(Band::from_channel_str(None), Band::Unknown);
    }

    #[test]
    fn serializes_with_session_field_names() {
        let reading = NetworkReading::new("Net1", "aa:bb:cc:dd:ee:ff", 72).with_channel("11");
        let json = serde_json::to_string(&reading).expect("serialize");
        assert!(json.contains("\"SSID\""));
        assert!(json.contains("\"BSSID\""));
        assert!(json.contains("\"Señal\""));
        assert!(json.contains("\"Canal\""));

        let back: NetworkReading = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, reading);
    }

    #[test]
    fn channel_is_optional_in_session_files() {
        let json = r#"{"SSID":"Net1","BSSID":"aa:bb:cc:dd:ee:ff","Señal":40}"#;
        let reading: NetworkReading = serde_json::from_str(json).expect("deserialize");
        assert_eq!(reading.channel, None);
        assert_eq!(reading.band(), Band::Unknown);
    }
}
