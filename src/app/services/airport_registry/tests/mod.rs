//! Shared test utilities and fixtures for airport registry tests

use crate::app::models::{Airport, Measurement};


/// Create a test airport, panicking on invalid coordinates
pub fn create_test_airport(iata: &str, lat: f64, lon: f64) -> Airport {
    Airport::new(iata, lat, lon).unwrap()
}

/// Wind measurement used across the registry tests
pub fn create_test_measurement(mean: f64) -> Measurement {
    Measurement::new(mean, 10, 20, 30, 10)
}
