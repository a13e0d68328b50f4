//! Application constants for the airport weather store
//!
//! This module contains the fixed values shared by the registry, update,
//! query and statistics services: geodesic constants, per-kind acceptance
//! ranges, validation limits and loader column positions.

// =============================================================================
// Geodesy
// =============================================================================

/// Earth radius in kilometres used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6372.8;

// =============================================================================
// Airport Validation
// =============================================================================

/// Required length of an IATA airport code
pub const IATA_CODE_LENGTH: usize = 3;

/// Valid latitude range in degrees (inclusive)
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees (inclusive)
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

// =============================================================================
// Measurement Acceptance Ranges
// =============================================================================

/// Accepted mean ranges per measurement kind
///
/// Lower bounds are inclusive, upper bounds exclusive. `None` means the
/// kind has no upper bound.
pub mod acceptance {
    /// Wind speed must not be negative
    pub const WIND: (f64, Option<f64>) = (0.0, None);

    /// Temperature in degrees Celsius
    pub const TEMPERATURE: (f64, Option<f64>) = (-50.0, Some(100.0));

    /// Relative humidity in percent
    pub const HUMIDITY: (f64, Option<f64>) = (0.0, Some(100.0));

    /// Pressure in millimetres of mercury
    pub const PRESSURE: (f64, Option<f64>) = (650.0, Some(800.0));

    /// Cloud cover in percent
    pub const CLOUDCOVER: (f64, Option<f64>) = (0.0, Some(100.0));

    /// Precipitation in centimetres
    pub const PRECIPITATION: (f64, Option<f64>) = (0.0, Some(100.0));
}

// =============================================================================
// Statistics Defaults
// =============================================================================

/// Records updated within this many hours count towards `datasize`
pub const DEFAULT_FRESHNESS_WINDOW_HOURS: u32 = 24;

/// Histogram upper bound used when no radius has been recorded yet
pub const DEFAULT_HISTOGRAM_BOUND: usize = 1000;

/// Number of buckets the radius histogram folds radii into
pub const RADIUS_BUCKET_MODULUS: usize = 10;

/// Largest radius a query may ask for
///
/// The histogram is sized by the largest recorded radius, so this caps its
/// allocation.
pub const DEFAULT_MAX_QUERY_RADIUS_KM: f64 = 100_000.0;

/// Hard ceiling on the histogram bound, whatever radii were recorded
pub const HISTOGRAM_BOUND_LIMIT: usize = 1_000_000;

// =============================================================================
// Airport Data File Layout
// =============================================================================

/// Column positions in an OpenFlights style airports.dat row
pub mod airport_file {
    /// IATA code column
    pub const IATA_COLUMN: usize = 4;

    /// Latitude column (decimal degrees)
    pub const LATITUDE_COLUMN: usize = 6;

    /// Longitude column (decimal degrees)
    pub const LONGITUDE_COLUMN: usize = 7;

    /// Minimum number of columns a usable row must contain
    pub const MIN_COLUMNS: usize = LONGITUDE_COLUMN + 1;
}

/// Health response returned by the collector ping
pub const COLLECTOR_READY: &str = "ready";
