//! Tests for query counting and the health snapshot

use super::*;
use crate::config::{FrequencyDenominator, StoreConfig};
use crate::constants::HISTOGRAM_BOUND_LIMIT;
use chrono::{Duration, TimeZone};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap()
}

#[test]
fn test_record_query_counts() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", 200.0);
    stats.record_query("JFK", 200.0);

    assert_eq!(stats.request_count("BOS"), 2);
    assert_eq!(stats.request_count("JFK"), 1);
    assert_eq!(stats.request_count("EWR"), 0);
    assert_eq!(stats.radius_count(200.0), 2);
    assert_eq!(stats.radius_count(0.0), 1);
    assert_eq!(stats.distinct_radii(), 2);
    assert_eq!(stats.total_requests(), 3);
}

#[test]
fn test_negative_zero_radius_is_zero() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", -0.0);

    assert_eq!(stats.distinct_radii(), 1);
    assert_eq!(stats.radius_count(0.0), 2);
}

#[test]
fn test_datasize_counts_only_fresh_non_empty_records() {
    let (registry, stats) = create_test_aggregator(&StoreConfig::default());

    stamp_wind(&registry, "BOS", now() - Duration::hours(1));
    stamp_wind(&registry, "JFK", now() - Duration::hours(25));
    // EWR stays empty

    let snapshot = stats.snapshot_at(now());
    assert_eq!(snapshot.datasize, 1);
}

#[test]
fn test_datasize_respects_configured_window() {
    let config = StoreConfig::default().with_freshness_window_hours(48);
    let (registry, stats) = create_test_aggregator(&config);

    stamp_wind(&registry, "BOS", now() - Duration::hours(1));
    stamp_wind(&registry, "JFK", now() - Duration::hours(25));

    assert_eq!(stats.snapshot_at(now()).datasize, 2);
}

#[test]
fn test_iata_frequency_divides_by_distinct_radii() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", 200.0);

    let snapshot = stats.snapshot_at(now());
    assert_eq!(snapshot.iata_frequency.len(), 3);
    assert_eq!(snapshot.iata_frequency["BOS"], 1.5);
    assert_eq!(snapshot.iata_frequency["JFK"], 0.0);
    assert_eq!(snapshot.iata_frequency["EWR"], 0.0);
}

#[test]
fn test_iata_frequency_divides_by_total_requests() {
    let config =
        StoreConfig::default().with_frequency_denominator(FrequencyDenominator::TotalRequests);
    let (_registry, stats) = create_test_aggregator(&config);

    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", 0.0);
    stats.record_query("BOS", 200.0);
    stats.record_query("JFK", 0.0);

    let snapshot = stats.snapshot_at(now());
    assert_eq!(snapshot.iata_frequency["BOS"], 0.75);
    assert_eq!(snapshot.iata_frequency["JFK"], 0.25);
}

#[test]
fn test_iata_frequency_without_queries_is_zero() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    let snapshot = stats.snapshot_at(now());
    assert!(snapshot.iata_frequency.values().all(|f| *f == 0.0));
}

#[test]
fn test_empty_histogram_uses_default_bound() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    let snapshot = stats.snapshot_at(now());
    assert_eq!(snapshot.radius_histogram.len(), 1001);
    assert_eq!(snapshot.total_radius_queries(), 0);
}

#[test]
fn test_histogram_buckets_by_radius_mod_ten() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("BOS", 200.0);
    stats.record_query("JFK", 200.0);
    stats.record_query("BOS", 15.0);
    stats.record_query("BOS", 5.5);
    stats.record_query("EWR", 37.9);

    let histogram = stats.snapshot_at(now()).radius_histogram;
    assert_eq!(histogram.len(), 201);
    assert_eq!(histogram[0], 2);
    assert_eq!(histogram[5], 2);
    assert_eq!(histogram[7], 1);
    assert_eq!(histogram.iter().sum::<u64>(), 5);
}

#[test]
fn test_removed_airports_drop_out_of_frequency() {
    let (registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("EWR", 10.0);
    registry.remove("EWR");

    let snapshot = stats.snapshot_at(now());
    assert!(!snapshot.iata_frequency.contains_key("EWR"));
    // the counter itself is never pruned
    assert_eq!(stats.request_count("EWR"), 1);
}

#[test]
fn test_snapshot_serializes_with_wire_names() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());
    stats.record_query("BOS", 3.0);

    let json = serde_json::to_value(stats.snapshot_at(now())).unwrap();
    assert_eq!(json["datasize"], 0);
    assert!(json["iata_freq"].is_object());
    assert_eq!(json["radius_freq"].as_array().unwrap().len(), 4);
}

#[test]
fn test_histogram_bound_is_capped() {
    let (_registry, stats) = create_test_aggregator(&StoreConfig::default());

    stats.record_query("BOS", 1.0e20);
    stats.record_query("JFK", f64::MAX);
    stats.record_query("EWR", 12.0);

    let histogram = stats.snapshot_at(now()).radius_histogram;
    assert_eq!(histogram.len(), HISTOGRAM_BOUND_LIMIT + 1);
    assert_eq!(histogram[2], 1);
    assert_eq!(histogram.iter().sum::<u64>(), 3);
}
