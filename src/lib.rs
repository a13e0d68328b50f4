//! Airport Weather Library
//!
//! An in-memory store of airport locations and their rolling atmospheric
//! readings, exposed through collect and query operations.
//!
//! This library provides tools for:
//! - Registering and removing airports keyed by IATA code
//! - Validating and applying measurements per measurement kind
//! - Finding airports within a great-circle radius of another airport
//! - Tracking query frequency and producing a usage snapshot
//! - Seeding the store from an airports.dat file

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod airport_loader;
        pub mod airport_registry;
        pub mod query_engine;
        pub mod stats_aggregator;
        pub mod update_engine;
        pub mod weather_service;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Airport, AtmosphericRecord, Measurement, MeasurementKind};
pub use app::services::weather_service::WeatherService;
pub use config::StoreConfig;

/// Result type alias for the airport weather store
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of errors, one per caller-visible outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    InvalidMeasurementKind,
    Internal,
}

/// Error types for airport weather operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed request parameter or body
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Airport not registered
    #[error("Airport not found: iata = {iata}")]
    AirportNotFound { iata: String },

    /// Atmospheric record missing for an airport
    #[error("Atmospheric record not found for airport: iata = {iata}")]
    AtmosphericRecordNotFound { iata: String },

    /// Airport already registered
    #[error("Airport already exists: iata = {iata}")]
    AirportExists { iata: String },

    /// Measurement kind name not recognised
    #[error(
        "Unknown measurement kind '{kind}': expected one of WIND, TEMPERATURE, HUMIDITY, PRESSURE, CLOUDCOVER, PRECIPITATION"
    )]
    InvalidMeasurementKind { kind: String },

    /// Measurement mean outside the accepted range (reject policy only)
    #[error("Measurement out of range for {kind}: mean {mean}")]
    MeasurementOutOfRange { kind: MeasurementKind, mean: f64 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON encoding or decoding error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an airport not found error
    pub fn airport_not_found(iata: impl Into<String>) -> Self {
        Self::AirportNotFound { iata: iata.into() }
    }

    /// Create an atmospheric record not found error
    pub fn atmospheric_record_not_found(iata: impl Into<String>) -> Self {
        Self::AtmosphericRecordNotFound { iata: iata.into() }
    }

    /// Create an airport exists (conflict) error
    pub fn airport_exists(iata: impl Into<String>) -> Self {
        Self::AirportExists { iata: iata.into() }
    }

    /// Create an invalid measurement kind error
    pub fn invalid_measurement_kind(kind: impl Into<String>) -> Self {
        Self::InvalidMeasurementKind { kind: kind.into() }
    }

    /// Create a measurement out of range error
    pub fn measurement_out_of_range(kind: MeasurementKind, mean: f64) -> Self {
        Self::MeasurementOutOfRange { kind, mean }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } | Self::MeasurementOutOfRange { .. } => ErrorKind::BadRequest,
            Self::AirportNotFound { .. } | Self::AtmosphericRecordNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::AirportExists { .. } => ErrorKind::Conflict,
            Self::InvalidMeasurementKind { .. } => ErrorKind::InvalidMeasurementKind,
            Self::Configuration { .. }
            | Self::Io { .. }
            | Self::CsvParsing { .. }
            | Self::Json { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status a transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::BadRequest | ErrorKind::InvalidMeasurementKind => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
