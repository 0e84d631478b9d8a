//! Survey report statistics.
//!
//! Aggregates the measurement store into per-SSID summaries: how many
//! points heard the network, the spread of its signal, the estimated
//! throughput, and the distribution of quality tiers. The output is plain
//! data; laying it out as a document is a host concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{classify, Tier};
use crate::domain::reading::Band;
use crate::domain::store::MeasurementStore;

// ---------------------------------------------------------------------------
// RunningStats -- Welford online statistics
// ---------------------------------------------------------------------------

/// Welford online mean/variance accumulator.
///
/// Lets the report pass over the store once without collecting per-SSID
/// value vectors.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one sample.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        #[allow(clippy::cast_precision_loss)]
        {
            self.mean += delta / self.count as f64;
        }
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of samples pushed.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, `0.0` when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, `0.0` below 2 samples.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                self.m2 / self.count as f64
            }
        }
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

// ---------------------------------------------------------------------------
// TierCounts
// ---------------------------------------------------------------------------

/// Histogram of quality tiers across a summary's readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    /// Readings at or above -50 dBm.
    pub excellent: usize,
    /// Readings at or above -65 dBm.
    pub good: usize,
    /// Readings at or above -75 dBm.
    pub fair: usize,
    /// Readings at or above -85 dBm.
    pub poor: usize,
    /// Readings below -85 dBm.
    pub critical: usize,
}

impl TierCounts {
    /// Tallies one classified reading.
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Excellent => self.excellent += 1,
            Tier::Good => self.good += 1,
            Tier::Fair => self.fair += 1,
            Tier::Poor => self.poor += 1,
            Tier::Critical => self.critical += 1,
        }
    }

    /// Total tallied readings.
    #[must_use]
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor + self.critical
    }

    /// Share of a tier in percent, `0.0` when nothing was tallied.
    #[must_use]
    pub fn percentage(&self, tier: Tier) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match tier {
            Tier::Excellent => self.excellent,
            Tier::Good => self.good,
            Tier::Fair => self.fair,
            Tier::Poor => self.poor,
            Tier::Critical => self.critical,
        };
        #[allow(clippy::cast_precision_loss)]
        {
            count as f64 / total as f64 * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// BandCounts
// ---------------------------------------------------------------------------

/// Histogram of frequency bands across a summary's readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    /// Readings on 2.4 GHz channels.
    pub band_2_4ghz: usize,
    /// Readings on 5 GHz channels.
    pub band_5ghz: usize,
    /// Readings without a parseable channel.
    pub unknown: usize,
}

impl BandCounts {
    /// Tallies one reading's band.
    pub fn record(&mut self, band: Band) {
        match band {
            Band::Band2_4GHz => self.band_2_4ghz += 1,
            Band::Band5GHz => self.band_5ghz += 1,
            Band::Unknown => self.unknown += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// SsidSummary
// ---------------------------------------------------------------------------

/// Per-SSID survey statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsidSummary {
    /// The network name.
    pub ssid: String,
    /// Number of measurement points with at least one reading of this
    /// SSID.
    pub points: usize,
    /// Total readings of this SSID across all points.
    pub readings: usize,
    /// Mean signal across those readings, in dBm.
    pub mean_dbm: f64,
    /// Population standard deviation of the signal, in dB.
    pub std_dev_dbm: f64,
    /// Mean estimated throughput across those readings, in Mbps.
    pub mean_mbps: f64,
    /// Quality-tier histogram of those readings.
    pub tiers: TierCounts,
    /// Frequency-band histogram of those readings.
    pub bands: BandCounts,
}

/// Summarizes the store per SSID, sorted by network name.
///
/// Readings with an empty SSID (hidden networks) are not reported.
#[must_use]
pub fn summarize(store: &MeasurementStore) -> Vec<SsidSummary> {
    struct Accumulator {
        points: usize,
        dbm: RunningStats,
        mbps: RunningStats,
        tiers: TierCounts,
        bands: BandCounts,
    }

    let mut by_ssid: BTreeMap<String, Accumulator> = BTreeMap::new();

    for point in store.all() {
        let mut seen_here: Vec<&str> = Vec::new();
        for reading in &point.readings {
            if reading.ssid.trim().is_empty() {
                continue;
            }
            let acc = by_ssid
                .entry(reading.ssid.clone())
                .or_insert_with(|| Accumulator {
                    points: 0,
                    dbm: RunningStats::new(),
                    mbps: RunningStats::new(),
                    tiers: TierCounts::default(),
                    bands: BandCounts::default(),
                });
            let dbm = reading.dbm();
            let classification = classify(dbm);
            acc.dbm.push(dbm);
            acc.mbps.push(classification.estimated_mbps);
            acc.tiers.record(classification.tier);
            acc.bands.record(reading.band());
            if !seen_here.contains(&reading.ssid.as_str()) {
                acc.points += 1;
                seen_here.push(reading.ssid.as_str());
            }
        }
    }

    by_ssid
        .into_iter()
        .map(|(ssid, acc)| {
            let readings = usize::try_from(acc.dbm.count()).unwrap_or(usize::MAX);
            SsidSummary {
                ssid,
                points: acc.points,
                readings,
                mean_dbm: acc.dbm.mean(),
                std_dev_dbm: acc.dbm.std_dev(),
                mean_mbps: acc.mbps.mean(),
                tiers: acc.tiers,
                bands: acc.bands,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::point::MeasurementPoint;
    use crate::domain::reading::NetworkReading;

    #[test]
    fn running_stats_mean_and_variance() {
        let mut stats = RunningStats::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(v);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        assert!((stats.std_dev() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn summary_groups_by_ssid() {
        let mut store = MeasurementStore::new();
        store.add(MeasurementPoint::new(
            0.0,
            0.0,
            vec![
                NetworkReading::new("Net1", "aa", 100).with_channel("36"), // -50 dBm, excellent
                NetworkReading::new("Net1", "bb", 60).with_channel("6"),   // -70 dBm, fair
                NetworkReading::new("Net2", "cc", 20),                     // -90 dBm, critical
                NetworkReading::new("", "dd", 50),                         // hidden, skipped
            ],
        ));
        store.add(MeasurementPoint::new(
            3.0,
            0.0,
            vec![NetworkReading::new("Net1", "aa", 100)],
        ));

        let summaries = summarize(&store);
        assert_eq!(summaries.len(), 2);

        let net1 = &summaries[0];
        assert_eq!(net1.ssid, "Net1");
        assert_eq!(net1.points, 2);
        assert_eq!(net1.readings, 3);
        assert_eq!(net1.tiers.excellent, 2);
        assert_eq!(net1.tiers.fair, 1);
        assert_eq!(net1.bands.band_5ghz, 1);
        assert_eq!(net1.bands.band_2_4ghz, 1);
        assert_eq!(net1.bands.unknown, 1);
        assert!((net1.mean_dbm - (-170.0 / 3.0)).abs() < 1e-9);
        assert!((net1.mean_mbps - (400.0 + 400.0 + 35.0) / 3.0).abs() < 1e-9);

        let net2 = &summaries[1];
        assert_eq!(net2.ssid, "Net2");
        assert_eq!(net2.points, 1);
        assert_eq!(net2.tiers.critical, 1);
        assert!((net2.tiers.percentage(Tier::Critical) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn empty_store_yields_no_summaries() {
        assert!(summarize(&MeasurementStore::new()).is_empty());
    }
}
