//! Data models for the airport weather store
//!
//! This module contains the core data structures: airports keyed by IATA
//! code, the measurement kinds a collector may report, individual
//! measurements, and the per-airport atmospheric record.

use crate::constants::{self, acceptance};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// =============================================================================
// Airport
// =============================================================================

/// Basic airport information
///
/// Identity is the IATA code alone; two airports with the same code are
/// equal regardless of their coordinates. Airports are immutable once
/// registered.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Airport {
    /// Three letter IATA code
    pub iata: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Airport {
    /// Create a new airport with validation
    pub fn new(iata: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let airport = Self {
            iata: iata.into(),
            latitude,
            longitude,
        };

        airport.validate()?;
        Ok(airport)
    }

    /// Validate the IATA code and coordinate ranges
    pub fn validate(&self) -> Result<()> {
        validate_iata(&self.iata)?;

        let (min_lat, max_lat) = constants::LATITUDE_RANGE;
        if !self.latitude.is_finite() || !(min_lat..=max_lat).contains(&self.latitude) {
            return Err(Error::bad_request(format!(
                "Invalid latitude {}: must be between {} and {} degrees",
                self.latitude, min_lat, max_lat
            )));
        }

        let (min_lon, max_lon) = constants::LONGITUDE_RANGE;
        if !self.longitude.is_finite() || !(min_lon..=max_lon).contains(&self.longitude) {
            return Err(Error::bad_request(format!(
                "Invalid longitude {}: must be between {} and {} degrees",
                self.longitude, min_lon, max_lon
            )));
        }

        Ok(())
    }

    /// Get airport location as (latitude, longitude) tuple
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl PartialEq for Airport {
    fn eq(&self, other: &Self) -> bool {
        self.iata == other.iata
    }
}

impl Eq for Airport {}

impl Hash for Airport {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iata.hash(state);
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iata={},latitude={},longitude={}",
            self.iata, self.latitude, self.longitude
        )
    }
}

/// Check that an IATA code has exactly three characters
pub fn validate_iata(iata: &str) -> Result<()> {
    if iata.chars().count() != constants::IATA_CODE_LENGTH {
        return Err(Error::bad_request(format!(
            "Invalid IATA code '{}': must be exactly {} characters",
            iata,
            constants::IATA_CODE_LENGTH
        )));
    }
    Ok(())
}

// =============================================================================
// Measurement Kinds
// =============================================================================

/// The six kinds of atmospheric measurement a collector can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasurementKind {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    CloudCover,
    Precipitation,
}

impl MeasurementKind {
    /// All measurement kinds in slot order
    pub const ALL: [MeasurementKind; 6] = [
        MeasurementKind::Wind,
        MeasurementKind::Temperature,
        MeasurementKind::Humidity,
        MeasurementKind::Pressure,
        MeasurementKind::CloudCover,
        MeasurementKind::Precipitation,
    ];

    /// Canonical upper-case name
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementKind::Wind => "WIND",
            MeasurementKind::Temperature => "TEMPERATURE",
            MeasurementKind::Humidity => "HUMIDITY",
            MeasurementKind::Pressure => "PRESSURE",
            MeasurementKind::CloudCover => "CLOUDCOVER",
            MeasurementKind::Precipitation => "PRECIPITATION",
        }
    }

    /// Accepted range of the mean: inclusive lower bound, optional exclusive upper bound
    pub fn acceptance_range(&self) -> (f64, Option<f64>) {
        match self {
            MeasurementKind::Wind => acceptance::WIND,
            MeasurementKind::Temperature => acceptance::TEMPERATURE,
            MeasurementKind::Humidity => acceptance::HUMIDITY,
            MeasurementKind::Pressure => acceptance::PRESSURE,
            MeasurementKind::CloudCover => acceptance::CLOUDCOVER,
            MeasurementKind::Precipitation => acceptance::PRECIPITATION,
        }
    }

    /// Check whether a mean value falls inside this kind's accepted range
    pub fn accepts(&self, mean: f64) -> bool {
        let (lower, upper) = self.acceptance_range();
        mean >= lower && upper.is_none_or(|upper| mean < upper)
    }

    fn slot(&self) -> usize {
        match self {
            MeasurementKind::Wind => 0,
            MeasurementKind::Temperature => 1,
            MeasurementKind::Humidity => 2,
            MeasurementKind::Pressure => 3,
            MeasurementKind::CloudCover => 4,
            MeasurementKind::Precipitation => 5,
        }
    }
}

impl FromStr for MeasurementKind {
    type Err = Error;

    /// Case-insensitive match against the kind names
    fn from_str(s: &str) -> Result<Self> {
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_measurement_kind(s))
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Measurement
// =============================================================================

/// A collected data point summarising recent observations of one kind
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Measurement {
    /// Mean of the observations
    pub mean: f64,

    /// First quartile, useful as a lower bound
    pub first: i32,

    /// Second quartile (median)
    pub second: i32,

    /// Third quartile, a less noisy upper value
    pub third: i32,

    /// Total number of observations
    pub count: i32,
}

impl Measurement {
    pub fn new(mean: f64, first: i32, second: i32, third: i32, count: i32) -> Self {
        Self {
            mean,
            first,
            second,
            third,
            count,
        }
    }

    /// Parse a measurement from its JSON body
    ///
    /// Missing fields default to zero, matching what collectors have always
    /// been allowed to send.
    pub fn from_json(body: &str) -> Result<Self> {
        let wire: MeasurementBody = serde_json::from_str(body).map_err(|e| {
            Error::bad_request(format!("Malformed measurement body '{}': {}", body, e))
        })?;
        Ok(wire.into())
    }
}

/// Wire form of a measurement where every field is optional
#[derive(Debug, Deserialize)]
struct MeasurementBody {
    #[serde(default)]
    mean: f64,
    #[serde(default)]
    first: i32,
    #[serde(default)]
    second: i32,
    #[serde(default)]
    third: i32,
    #[serde(default)]
    count: i32,
}

impl From<MeasurementBody> for Measurement {
    fn from(body: MeasurementBody) -> Self {
        Measurement::new(body.mean, body.first, body.second, body.third, body.count)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean={},first={},second={},third={},count={}",
            self.mean, self.first, self.second, self.third, self.count
        )
    }
}

// =============================================================================
// Atmospheric Record
// =============================================================================

/// Latest measurements of every kind for one airport
///
/// Created empty together with its airport. `last_update_time` is the time
/// of the most recent accepted write across any kind.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AtmosphericRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Measurement>,

    #[serde(rename = "cloudCover", skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<Measurement>,

    #[serde(rename = "lastUpdateTime", skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl AtmosphericRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the measurement stored for a kind
    pub fn get(&self, kind: MeasurementKind) -> Option<&Measurement> {
        self.slots()[kind.slot()]
    }

    /// Store a measurement in the slot for its kind
    pub fn set(&mut self, kind: MeasurementKind, measurement: Measurement) {
        let slot = match kind {
            MeasurementKind::Wind => &mut self.wind,
            MeasurementKind::Temperature => &mut self.temperature,
            MeasurementKind::Humidity => &mut self.humidity,
            MeasurementKind::Pressure => &mut self.pressure,
            MeasurementKind::CloudCover => &mut self.cloud_cover,
            MeasurementKind::Precipitation => &mut self.precipitation,
        };
        *slot = Some(measurement);
    }

    /// True when at least one slot holds a measurement
    pub fn has_measurements(&self) -> bool {
        self.slots().iter().any(Option::is_some)
    }

    /// Number of filled slots
    pub fn measurement_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.is_some()).count()
    }

    /// Check whether the record was updated within `window` of `now`
    pub fn updated_within(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.last_update_time
            .is_some_and(|updated| updated > now - window)
    }

    fn slots(&self) -> [Option<&Measurement>; 6] {
        [
            self.wind.as_ref(),
            self.temperature.as_ref(),
            self.humidity.as_ref(),
            self.pressure.as_ref(),
            self.cloud_cover.as_ref(),
            self.precipitation.as_ref(),
        ]
    }
}
