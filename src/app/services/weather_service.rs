//! Weather service: the composition root of the store
//!
//! Owns one registry, update engine, query engine and statistics aggregator
//! and exposes the collect and query operations a transport layer maps to
//! its endpoints. Parameters arrive as raw strings, exactly as they would
//! from a request path, and are validated here.
//!
//! The service is constructed explicitly and shared by reference or `Arc`;
//! there is no global instance.

use crate::app::models::{Airport, AtmosphericRecord, Measurement, MeasurementKind, validate_iata};
use crate::app::services::airport_registry::{AddOutcome, AirportRegistry, RemoveOutcome};
use crate::app::services::query_engine::QueryEngine;
use crate::app::services::stats_aggregator::{StatsAggregator, StatsSnapshot};
use crate::app::services::update_engine::{UpdateEngine, UpdateOutcome};
use crate::config::StoreConfig;
use crate::constants::COLLECTOR_READY;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// In-memory airport weather store
#[derive(Debug)]
pub struct WeatherService {
    config: StoreConfig,
    registry: Arc<AirportRegistry>,
    stats: Arc<StatsAggregator>,
    updater: UpdateEngine,
    query: QueryEngine,
}

impl WeatherService {
    /// Build a store from a validated configuration
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(AirportRegistry::new());
        let stats = Arc::new(StatsAggregator::new(Arc::clone(&registry), &config));
        let updater = UpdateEngine::new(config.out_of_range_policy);
        let query = QueryEngine::new(
            Arc::clone(&registry),
            Arc::clone(&stats),
            config.distance_formula,
        );

        debug!("Weather service created with {:?}", config);
        Ok(Self {
            config,
            registry,
            stats,
            updater,
            query,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Underlying airport registry
    pub fn registry(&self) -> &AirportRegistry {
        &self.registry
    }

    /// Underlying statistics aggregator
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    // =========================================================================
    // Collect operations
    // =========================================================================

    /// Collector liveness check
    pub fn collector_ping(&self) -> &'static str {
        COLLECTOR_READY
    }

    /// Register an airport from raw path parameters
    ///
    /// # Errors
    /// * `Error::BadRequest` for a malformed code or coordinates
    /// * `Error::AirportExists` if the code is already registered
    pub fn add_airport(&self, iata: &str, latitude: &str, longitude: &str) -> Result<Airport> {
        validate_iata(iata).inspect_err(|e| warn!("{}", e))?;
        let latitude = parse_coordinate("latitude", latitude)?;
        let longitude = parse_coordinate("longitude", longitude)?;
        let airport = Airport::new(iata, latitude, longitude).inspect_err(|e| warn!("{}", e))?;

        match self.registry.add(airport.clone()) {
            AddOutcome::Added => {
                info!("Added airport {}", airport);
                Ok(airport)
            }
            AddOutcome::AlreadyExists => {
                debug!("Airport data already exists for {}", iata);
                Err(Error::airport_exists(iata))
            }
        }
    }

    /// Remove an airport and its atmospheric record
    pub fn remove_airport(&self, iata: &str) -> Result<()> {
        validate_iata(iata).inspect_err(|e| warn!("{}", e))?;

        match self.registry.remove(iata) {
            RemoveOutcome::Removed => {
                info!("Removed airport {}", iata);
                Ok(())
            }
            RemoveOutcome::NotFound => {
                warn!("Airport {} not found while deleting", iata);
                Err(Error::airport_not_found(iata))
            }
        }
    }

    /// Airport data for one IATA code
    pub fn get_airport(&self, iata: &str) -> Result<Airport> {
        validate_iata(iata).inspect_err(|e| warn!("{}", e))?;

        self.registry.find(iata).ok_or_else(|| {
            warn!("Airport {} not found while retrieving", iata);
            Error::airport_not_found(iata)
        })
    }

    /// IATA codes of all registered airports
    pub fn airports(&self) -> HashSet<String> {
        self.registry.iata_codes()
    }

    /// Apply a measurement posted as a JSON body
    ///
    /// Checks run in this order: IATA code, kind present, airport known,
    /// body well formed, kind recognised.
    ///
    /// # Errors
    /// * `Error::BadRequest` for a malformed code, blank kind or bad body
    /// * `Error::AtmosphericRecordNotFound` if the airport is not registered
    /// * `Error::InvalidMeasurementKind` for an unknown kind name
    pub fn update_weather(&self, iata: &str, kind: &str, body: &str) -> Result<UpdateOutcome> {
        validate_iata(iata).inspect_err(|e| warn!("{}", e))?;
        if kind.trim().is_empty() {
            warn!("Missing measurement kind for airport {}", iata);
            return Err(Error::bad_request("Measurement kind must be specified"));
        }
        if !self.registry.contains(iata) {
            warn!("Atmospheric record not found for airport {}", iata);
            return Err(Error::atmospheric_record_not_found(iata));
        }

        let point = Measurement::from_json(body).inspect_err(|e| warn!("{}", e))?;
        let kind = kind
            .parse::<MeasurementKind>()
            .inspect_err(|e| warn!("{}", e))?;

        self.update_weather_at(iata, kind, point, Utc::now())
    }

    /// Apply a parsed measurement at an explicit time
    pub fn update_weather_at(
        &self,
        iata: &str,
        kind: MeasurementKind,
        point: Measurement,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let outcome = self
            .registry
            .update_with(iata, |record| {
                self.updater.apply_kind_at(record, kind, point, now)
            })
            .ok_or_else(|| {
                warn!("Airport {} removed before {} update", iata, kind);
                Error::atmospheric_record_not_found(iata)
            })??;

        debug!("{} update for {}: {:?} ({})", kind, iata, outcome, point);
        Ok(outcome)
    }

    // =========================================================================
    // Query operations
    // =========================================================================

    /// Atmospheric records of an airport and its neighbours within `radius` km
    ///
    /// A blank radius means zero.
    ///
    /// # Errors
    /// * `Error::BadRequest` for a malformed radius or an unknown airport
    pub fn weather(&self, iata: &str, radius: &str) -> Result<Vec<AtmosphericRecord>> {
        let radius_km = self.parse_radius(radius)?;

        self.query.nearby(iata, radius_km).map_err(|e| match e {
            Error::AirportNotFound { iata } => {
                warn!("Airport data could not be found for {}", iata);
                Error::bad_request(format!("Airport data not found for iata [{}]", iata))
            }
            other => other,
        })
    }

    /// Health and usage snapshot
    pub fn ping(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Health and usage snapshot against an explicit clock
    pub fn ping_at(&self, now: DateTime<Utc>) -> StatsSnapshot {
        self.stats.snapshot_at(now)
    }

    fn parse_radius(&self, radius: &str) -> Result<f64> {
        let radius = radius.trim();
        if radius.is_empty() {
            return Ok(0.0);
        }

        let radius_km = radius.parse::<f64>().map_err(|e| {
            warn!("Bad radius parameter '{}'", radius);
            Error::bad_request(format!("Invalid radius '{}': {}", radius, e))
        })?;

        if !radius_km.is_finite() || radius_km < 0.0 || radius_km > self.config.max_query_radius_km
        {
            warn!("Radius {} out of range", radius_km);
            return Err(Error::bad_request(format!(
                "Invalid radius {}: must be between 0 and {} km",
                radius_km, self.config.max_query_radius_km
            )));
        }

        Ok(radius_km)
    }
}

fn parse_coordinate(name: &str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|e| {
        warn!("Wrong airport coordinate {} '{}'", name, value);
        Error::bad_request(format!("Invalid {} '{}': {}", name, value, e))
    })
}
