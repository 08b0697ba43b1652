// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    just_now = { 0, Freshness::Fresh },
    twenty_three_hours = { 23 * 3600, Freshness::Fresh },
    twenty_four_hours = { 24 * 3600, Freshness::Stale },
    six_days = { 6 * 24 * 3600, Freshness::Stale },
    seven_days = { 7 * 24 * 3600, Freshness::VeryStale },
    twenty_nine_days = { 29 * 24 * 3600, Freshness::VeryStale },
    thirty_days = { 30 * 24 * 3600, Freshness::Expired },
    ninety_days = { 90 * 24 * 3600, Freshness::Expired },
)]
fn default_thresholds_classify_age_in_seconds(age_secs: u64, expected: Freshness) {
    let thresholds = FreshnessThresholds::default();
    assert_eq!(thresholds.classify(std::time::Duration::from_secs(age_secs)), expected);
}

#[test]
fn freshness_is_monotone_in_elapsed_time() {
    // spec.md §8 invariant 6: Fresh <= Stale <= VeryStale <= Expired.
    assert!(Freshness::Fresh <= Freshness::Stale);
    assert!(Freshness::Stale <= Freshness::VeryStale);
    assert!(Freshness::VeryStale <= Freshness::Expired);
}

#[test]
fn thresholds_roundtrip_through_json_as_humantime_strings() {
    let thresholds = FreshnessThresholds::default();
    let json = serde_json::to_string(&thresholds).unwrap();
    assert!(json.contains("24h") || json.contains("86400s"));
    let parsed: FreshnessThresholds = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, thresholds);
}
