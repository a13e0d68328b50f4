//! Shared fixtures for statistics aggregator tests

use crate::app::models::{Airport, Measurement, MeasurementKind};
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::stats_aggregator::StatsAggregator;
use crate::config::StoreConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod snapshot_tests;

/// Registry with BOS, JFK and EWR and an aggregator over it
pub fn create_test_aggregator(config: &StoreConfig) -> (Arc<AirportRegistry>, StatsAggregator) {
    let registry = Arc::new(AirportRegistry::new());
    for (iata, lat, lon) in [
        ("BOS", 42.36, -71.00),
        ("JFK", 40.64, -73.78),
        ("EWR", 40.69, -74.17),
    ] {
        registry.add(Airport::new(iata, lat, lon).unwrap());
    }
    let stats = StatsAggregator::new(Arc::clone(&registry), config);
    (registry, stats)
}

/// Put a wind reading on an airport stamped at `at`
pub fn stamp_wind(registry: &AirportRegistry, iata: &str, at: DateTime<Utc>) {
    registry.update_with(iata, |record| {
        record.set(MeasurementKind::Wind, Measurement::new(22.0, 10, 20, 30, 10));
        record.last_update_time = Some(at);
    });
}
