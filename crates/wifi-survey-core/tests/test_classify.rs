//! Integration tests for signal classification: totality, monotonicity,
//! and the fixed reference table.

use wifi_survey_core::prelude::*;

/// Every band's representative value maps to its documented tier,
/// throughput, and technology.
#[test]
fn reference_table() {
    let cases = [
        (-42.0, Tier::Excellent, 400.0, "802.11ac/n 5GHz"),
        (-60.0, Tier::Good, 100.0, "802.11n/g"),
        (-70.0, Tier::Fair, 35.0, "802.11g/b"),
        (-80.0, Tier::Poor, 8.0, "802.11b"),
        (-99.0, Tier::Critical, 0.5, "no link"),
    ];
    for (dbm, tier, mbps, technology) in cases {
        let c = classify(dbm);
        assert_eq!(c.tier, tier, "tier at {dbm} dBm");
        assert!((c.estimated_mbps - mbps).abs() < f64::EPSILON);
        assert_eq!(c.technology, technology);
    }
}

/// Classification is total: a fine sweep over the plausible dBm range
/// produces exactly one tier everywhere, with no gaps or overlaps.
#[test]
fn total_over_the_dbm_range() {
    let mut dbm = -130.0;
    while dbm <= 10.0 {
        let c = classify(dbm);
        let by_threshold = if dbm >= -50.0 {
            Tier::Excellent
        } else if dbm >= -65.0 {
            Tier::Good
        } else if dbm >= -75.0 {
            Tier::Fair
        } else if dbm >= -85.0 {
            Tier::Poor
        } else {
            Tier::Critical
        };
        assert_eq!(c.tier, by_threshold, "band mismatch at {dbm} dBm");
        dbm += 0.125;
    }
}

/// Stronger signal never estimates a lower throughput.
#[test]
fn throughput_weakly_monotonic_in_signal() {
    let mut previous = f64::NEG_INFINITY;
    let mut dbm = -120.0;
    while dbm <= 0.0 {
        let mbps = classify(dbm).estimated_mbps;
        assert!(
            mbps >= previous,
            "classify({dbm}).estimated_mbps = {mbps} dropped below {previous}"
        );
        previous = mbps;
        dbm += 0.5;
    }
}

/// The classifier agrees with the raw-unit conversion used by the store:
/// a full-strength scan reading lands in the Excellent band.
#[test]
fn composes_with_reading_conversion() {
    let reading = NetworkReading::new("Net1", "aa:bb", 100);
    assert_eq!(classify(reading.dbm()).tier, Tier::Excellent);
    let weak = NetworkReading::new("Net1", "aa:bb", 10);
    assert_eq!(classify(weak.dbm()).tier, Tier::Critical);
}
