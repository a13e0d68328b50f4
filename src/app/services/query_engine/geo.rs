//! Great-circle distance between airports

use crate::app::models::Airport;
use crate::config::DistanceFormula;
use crate::constants::EARTH_RADIUS_KM;

/// Haversine distance between two airports in kilometres
///
/// With `DistanceFormula::Legacy` the latitudes inside the `cos` terms are
/// passed in degrees rather than radians. That reproduces the distances
/// existing clients have been served; `Geodesic` gives the true distance.
pub fn distance(a: &Airport, b: &Airport, formula: DistanceFormula) -> f64 {
    haversine(a.latitude, a.longitude, b.latitude, b.longitude, formula)
}

/// Haversine distance between two coordinate pairs in kilometres
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64, formula: DistanceFormula) -> f64 {
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let (cos_lat1, cos_lat2) = match formula {
        DistanceFormula::Legacy => (lat1.cos(), lat2.cos()),
        DistanceFormula::Geodesic => (lat1.to_radians().cos(), lat2.to_radians().cos()),
    };

    let a = (delta_lat / 2.0).sin().powi(2)
        + (delta_lon / 2.0).sin().powi(2) * cos_lat1 * cos_lat2;
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}
