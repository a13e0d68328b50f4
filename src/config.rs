//! Configuration management and validation.
//!
//! Provides the store configuration: how out-of-range measurements are
//! treated, which distance formula the radius query uses, and the knobs the
//! usage statistics depend on.

use crate::constants::{
    DEFAULT_FRESHNESS_WINDOW_HOURS, DEFAULT_HISTOGRAM_BOUND, DEFAULT_MAX_QUERY_RADIUS_KM,
    HISTOGRAM_BOUND_LIMIT,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// What to do with a measurement whose mean is outside its kind's range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Report success and leave the record untouched
    #[default]
    Ignore,
    /// Fail with `Error::MeasurementOutOfRange`
    Reject,
}

/// Haversine variant used for radius queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFormula {
    /// Latitudes enter `cos()` in degrees, bit-compatible with existing deployments
    #[default]
    Legacy,
    /// Latitudes converted to radians everywhere
    Geodesic,
}

/// Denominator for the per-airport request fraction in the usage snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyDenominator {
    /// Number of distinct radius values ever queried
    #[default]
    DistinctRadii,
    /// Total number of queries across all airports
    TotalRequests,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Treatment of out-of-range measurement values
    pub out_of_range_policy: OutOfRangePolicy,

    /// Distance formula for nearby queries
    pub distance_formula: DistanceFormula,

    /// Denominator of `iata_freq`
    pub frequency_denominator: FrequencyDenominator,

    /// Records updated within this many hours count towards `datasize`
    pub freshness_window_hours: u32,

    /// Histogram bound used before any radius has been recorded
    pub default_histogram_bound: usize,

    /// Largest accepted query radius in kilometres
    pub max_query_radius_km: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            out_of_range_policy: OutOfRangePolicy::Ignore,
            distance_formula: DistanceFormula::Legacy,
            frequency_denominator: FrequencyDenominator::DistinctRadii,
            freshness_window_hours: DEFAULT_FRESHNESS_WINDOW_HOURS,
            default_histogram_bound: DEFAULT_HISTOGRAM_BOUND,
            max_query_radius_km: DEFAULT_MAX_QUERY_RADIUS_KM,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::json(
                format!("Failed to parse configuration file {}", path.display()),
                e,
            )
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.freshness_window_hours == 0 {
            return Err(Error::configuration(
                "freshness_window_hours must be greater than zero",
            ));
        }

        if !self.max_query_radius_km.is_finite()
            || self.max_query_radius_km <= 0.0
            || self.max_query_radius_km > HISTOGRAM_BOUND_LIMIT as f64
        {
            return Err(Error::configuration(format!(
                "max_query_radius_km must be in (0, {}], got {}",
                HISTOGRAM_BOUND_LIMIT, self.max_query_radius_km
            )));
        }

        if self.default_histogram_bound > HISTOGRAM_BOUND_LIMIT {
            return Err(Error::configuration(format!(
                "default_histogram_bound must be at most {}, got {}",
                HISTOGRAM_BOUND_LIMIT, self.default_histogram_bound
            )));
        }

        Ok(())
    }

    /// Freshness window as a duration
    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.freshness_window_hours))
    }

    /// Reject out-of-range measurements instead of ignoring them
    pub fn with_out_of_range_policy(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range_policy = policy;
        self
    }

    /// Use a different distance formula
    pub fn with_distance_formula(mut self, formula: DistanceFormula) -> Self {
        self.distance_formula = formula;
        self
    }

    /// Use a different request frequency denominator
    pub fn with_frequency_denominator(mut self, denominator: FrequencyDenominator) -> Self {
        self.frequency_denominator = denominator;
        self
    }

    /// Set the freshness window in hours
    pub fn with_freshness_window_hours(mut self, hours: u32) -> Self {
        self.freshness_window_hours = hours;
        self
    }

    /// Set the maximum query radius
    pub fn with_max_query_radius_km(mut self, radius_km: f64) -> Self {
        self.max_query_radius_km = radius_km;
        self
    }
}
