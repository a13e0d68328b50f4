//! Radius queries over the airport registry
//!
//! Given an airport and a radius, the query engine returns the airport's own
//! atmospheric record followed by the records of every airport within the
//! radius that holds at least one measurement. Each query is counted by the
//! statistics aggregator.

use crate::app::models::AtmosphericRecord;
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::stats_aggregator::StatsAggregator;
use crate::config::DistanceFormula;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

pub mod geo;

#[cfg(test)]
pub mod tests;

/// Nearby-airport search engine
#[derive(Debug, Clone)]
pub struct QueryEngine {
    registry: Arc<AirportRegistry>,
    stats: Arc<StatsAggregator>,
    formula: DistanceFormula,
}

impl QueryEngine {
    /// Create a query engine over a shared registry and statistics aggregator
    pub fn new(
        registry: Arc<AirportRegistry>,
        stats: Arc<StatsAggregator>,
        formula: DistanceFormula,
    ) -> Self {
        Self {
            registry,
            stats,
            formula,
        }
    }

    /// Distance formula in use
    pub fn formula(&self) -> DistanceFormula {
        self.formula
    }

    /// Atmospheric records of an airport and its neighbours
    ///
    /// The queried airport's record always comes first, even when empty. For
    /// a non-zero radius every registered airport is scanned, the queried one
    /// included, and each record that has a measurement and lies within
    /// `radius_km` is appended. A queried airport with measurements therefore
    /// appears twice. Order after the first element follows registry
    /// iteration and is not stable.
    ///
    /// # Errors
    /// * `Error::BadRequest` if the radius is negative or not finite
    /// * `Error::AirportNotFound` if `iata` is not registered
    pub fn nearby(&self, iata: &str, radius_km: f64) -> Result<Vec<AtmosphericRecord>> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(Error::bad_request(format!(
                "Invalid radius {}: must be a non-negative number",
                radius_km
            )));
        }

        let origin = self
            .registry
            .find(iata)
            .ok_or_else(|| Error::airport_not_found(iata))?;

        self.stats.record_query(iata, radius_km);

        // The airport may have been removed since the lookup above
        let own = self
            .registry
            .find_atmospheric(iata)
            .ok_or_else(|| Error::airport_not_found(iata))?;

        let mut results = vec![own];
        if radius_km == 0.0 {
            return Ok(results);
        }

        results.extend(
            self.registry
                .entries()
                .into_iter()
                .filter(|(airport, _)| {
                    geo::distance(&origin, airport, self.formula) <= radius_km
                })
                .filter(|(_, record)| record.has_measurements())
                .map(|(_, record)| record),
        );

        debug!(
            "Query {} within {} km matched {} records",
            iata,
            radius_km,
            results.len()
        );
        Ok(results)
    }
}
