//! Shared fixtures for update engine tests

use crate::app::models::Measurement;
use chrono::{DateTime, TimeZone, Utc};

pub mod range_tests;

/// Measurement with the given mean and fixed quartiles
pub fn measurement(mean: f64) -> Measurement {
    Measurement::new(mean, 10, 20, 30, 10)
}

/// Fixed timestamp so assertions on `last_update_time` are exact
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}
