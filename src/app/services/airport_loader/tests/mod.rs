//! Shared fixtures for airport loader tests

use crate::app::services::weather_service::WeatherService;
use crate::config::StoreConfig;
use std::fs;
use std::path::{Path, PathBuf};


/// A small airports.dat sample in OpenFlights layout
pub const SAMPLE_AIRPORTS: &str = r#"1,"General Edward Lawrence Logan International Airport","Boston","United States","BOS","KBOS",42.36429977,-71.00520325,20,-5,"A","America/New_York"
2,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York"
3,"Newark Liberty International Airport","Newark","United States","EWR","KEWR",40.69250107,-74.16870117,18,-5,"A","America/New_York"
4,"La Guardia Airport","New York","United States","LGA","KLGA",40.77719879,-73.87259674,21,-5,"A","America/New_York"
"#;

/// Fresh service with default configuration
pub fn create_test_service() -> WeatherService {
    WeatherService::new(StoreConfig::default()).unwrap()
}

/// Write an airports file into `dir`
pub fn write_airport_file(dir: &Path, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("airports.dat");
    fs::write(&path, content)?;
    Ok(path)
}
