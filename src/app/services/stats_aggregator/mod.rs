//! Usage statistics for the query side
//!
//! Tracks how often each airport is queried and which radii are asked for,
//! and produces the health snapshot served by the ping operation.
//!
//! Counters are process-wide and never pruned. They are statistics only:
//! the snapshot reads them without a global lock, so a snapshot taken while
//! queries are running is approximate.

use crate::app::services::airport_registry::AirportRegistry;
use crate::config::{FrequencyDenominator, StoreConfig};
use crate::constants::{HISTOGRAM_BOUND_LIMIT, RADIUS_BUCKET_MODULUS};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Health and usage snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Records with at least one measurement updated inside the freshness window
    pub datasize: usize,

    /// Request fraction per registered airport
    #[serde(rename = "iata_freq")]
    pub iata_frequency: BTreeMap<String, f64>,

    /// Query counts folded into buckets by `floor(radius) mod 10`
    #[serde(rename = "radius_freq")]
    pub radius_histogram: Vec<u64>,
}

impl StatsSnapshot {
    /// Total of all histogram buckets
    pub fn total_radius_queries(&self) -> u64 {
        self.radius_histogram.iter().sum()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Stats: {} fresh records | {} airports | {} radius queries",
            self.datasize,
            self.iata_frequency.len(),
            self.total_radius_queries()
        )
    }
}

/// Query frequency tracker and snapshot builder
#[derive(Debug)]
pub struct StatsAggregator {
    registry: Arc<AirportRegistry>,

    /// Queries per IATA code
    request_frequency: DashMap<String, u64>,

    /// Queries per radius, keyed by the radius' bit pattern
    radius_frequency: DashMap<u64, u64>,

    denominator: FrequencyDenominator,
    default_histogram_bound: usize,
    freshness_window: chrono::Duration,
}

impl StatsAggregator {
    /// Create an aggregator reporting on the given registry
    pub fn new(registry: Arc<AirportRegistry>, config: &StoreConfig) -> Self {
        Self {
            registry,
            request_frequency: DashMap::new(),
            radius_frequency: DashMap::new(),
            denominator: config.frequency_denominator,
            default_histogram_bound: config.default_histogram_bound,
            freshness_window: config.freshness_window(),
        }
    }

    /// Count one query for an airport at a radius
    pub fn record_query(&self, iata: &str, radius_km: f64) {
        *self
            .request_frequency
            .entry(iata.to_string())
            .or_insert(0) += 1;

        // -0.0 and 0.0 are the same radius
        let radius_km = if radius_km == 0.0 { 0.0 } else { radius_km };
        *self
            .radius_frequency
            .entry(radius_km.to_bits())
            .or_insert(0) += 1;
    }

    /// Number of queries recorded for an airport
    pub fn request_count(&self, iata: &str) -> u64 {
        self.request_frequency
            .get(iata)
            .map(|count| *count)
            .unwrap_or(0)
    }

    /// Number of queries recorded for an exact radius
    pub fn radius_count(&self, radius_km: f64) -> u64 {
        let radius_km = if radius_km == 0.0 { 0.0 } else { radius_km };
        self.radius_frequency
            .get(&radius_km.to_bits())
            .map(|count| *count)
            .unwrap_or(0)
    }

    /// Number of distinct radius values ever queried
    pub fn distinct_radii(&self) -> usize {
        self.radius_frequency.len()
    }

    /// Total number of queries recorded
    pub fn total_requests(&self) -> u64 {
        self.request_frequency.iter().map(|entry| *entry.value()).sum()
    }

    /// Snapshot at the current time
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Snapshot evaluated against an explicit clock
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> StatsSnapshot {
        let datasize = self
            .registry
            .records()
            .iter()
            .filter(|record| {
                record.has_measurements() && record.updated_within(now, self.freshness_window)
            })
            .count();

        let denominator = match self.denominator {
            FrequencyDenominator::DistinctRadii => self.distinct_radii() as f64,
            FrequencyDenominator::TotalRequests => self.total_requests() as f64,
        };
        let iata_frequency = self
            .registry
            .iata_codes()
            .into_iter()
            .map(|iata| {
                let fraction = if denominator == 0.0 {
                    0.0
                } else {
                    self.request_count(&iata) as f64 / denominator
                };
                (iata, fraction)
            })
            .collect();

        let snapshot = StatsSnapshot {
            datasize,
            iata_frequency,
            radius_histogram: self.radius_histogram(),
        };
        debug!("{}", snapshot.summary());
        snapshot
    }

    /// Histogram of radius counts
    ///
    /// Sized `max_radius + 1` (or the default bound plus one when nothing has
    /// been recorded); each radius adds its count to bucket
    /// `floor(radius) mod 10`. The bound never exceeds `HISTOGRAM_BOUND_LIMIT`.
    fn radius_histogram(&self) -> Vec<u64> {
        let radii: Vec<(f64, u64)> = self
            .radius_frequency
            .iter()
            .map(|entry| (f64::from_bits(*entry.key()), *entry.value()))
            .collect();

        let max_bound = radii
            .iter()
            .map(|(radius, _)| radius.floor() as usize)
            .max()
            .unwrap_or(self.default_histogram_bound)
            .min(HISTOGRAM_BOUND_LIMIT);

        let mut histogram = vec![0u64; max_bound + 1];
        for (radius, count) in radii {
            let bucket = radius.floor() as usize % RADIUS_BUCKET_MODULUS;
            histogram[bucket] += count;
        }
        histogram
    }
}
