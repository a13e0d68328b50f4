//! Shared fixtures for query engine tests

use crate::app::models::{Airport, Measurement, MeasurementKind};
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::query_engine::QueryEngine;
use crate::app::services::stats_aggregator::StatsAggregator;
use crate::config::{DistanceFormula, StoreConfig};
use std::sync::Arc;


/// New York area airports plus Boston
pub const TEST_AIRPORTS: &[(&str, f64, f64)] = &[
    ("BOS", 42.36, -71.00),
    ("JFK", 40.64, -73.78),
    ("EWR", 40.69, -74.17),
    ("LGA", 40.77, -73.87),
];

/// Wind data point posted by the collector in the query scenarios
pub fn wind_point() -> Measurement {
    Measurement::new(22.0, 10, 20, 30, 10)
}

pub struct QueryFixture {
    pub registry: Arc<AirportRegistry>,
    pub stats: Arc<StatsAggregator>,
    pub engine: QueryEngine,
}

/// Registry seeded with `TEST_AIRPORTS`, all records empty
pub fn create_fixture(formula: DistanceFormula) -> QueryFixture {
    let registry = Arc::new(AirportRegistry::new());
    for (iata, lat, lon) in TEST_AIRPORTS {
        registry.add(Airport::new(*iata, *lat, *lon).unwrap());
    }
    let stats = Arc::new(StatsAggregator::new(
        Arc::clone(&registry),
        &StoreConfig::default(),
    ));
    let engine = QueryEngine::new(Arc::clone(&registry), Arc::clone(&stats), formula);

    QueryFixture {
        registry,
        stats,
        engine,
    }
}

/// Give an airport a wind measurement
pub fn post_wind(registry: &AirportRegistry, iata: &str) {
    registry.update_with(iata, |record| {
        record.set(MeasurementKind::Wind, wind_point());
        record.last_update_time = Some(chrono::Utc::now());
    });
}
