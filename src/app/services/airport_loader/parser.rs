//! Row parsing for airports.dat files

use crate::constants::airport_file::{
    IATA_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN, MIN_COLUMNS,
};
use crate::{Error, Result};
use csv::StringRecord;

/// The fields of an airports.dat row the store needs, still as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportRow {
    pub iata: String,
    pub latitude: String,
    pub longitude: String,
}

/// Extract IATA code and coordinates from a data row
///
/// Stray quote characters are stripped from each field.
pub fn parse_airport_row(record: &StringRecord) -> Result<AirportRow> {
    if record.len() < MIN_COLUMNS {
        return Err(Error::bad_request(format!(
            "Row has {} columns, expected at least {}",
            record.len(),
            MIN_COLUMNS
        )));
    }

    Ok(AirportRow {
        iata: field(record, IATA_COLUMN),
        latitude: field(record, LATITUDE_COLUMN),
        longitude: field(record, LONGITUDE_COLUMN),
    })
}

fn field(record: &StringRecord, index: usize) -> String {
    record
        .get(index)
        .unwrap_or_default()
        .replace('"', "")
        .trim()
        .to_string()
}
