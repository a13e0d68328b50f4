//! Bulk airport loading from airports.dat files
//!
//! Reads an OpenFlights style comma-delimited airport file and registers
//! one airport per row through the same validation path as the add airport
//! operation. Bad rows are skipped and reported, never fatal.

use crate::app::services::weather_service::WeatherService;
use crate::{Error, ErrorKind, Result};
use csv::ReaderBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

pub mod metadata;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use metadata::LoadStats;
pub use parser::{AirportRow, parse_airport_row};

impl WeatherService {
    /// Load airports from a file on disk
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::BadRequest` if the file is empty
    pub async fn load_airport_file(&self, path: &Path, show_progress: bool) -> Result<LoadStats> {
        info!("Loading airports from {}", path.display());

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        if content.is_empty() {
            return Err(Error::bad_request(format!(
                "{} is not a valid input: file is empty",
                path.display()
            )));
        }

        self.load_from(content.as_slice(), &path.display().to_string(), show_progress)
    }

    /// Load airports from any reader of airports.dat rows
    pub fn load_airports<R: Read>(&self, reader: R, show_progress: bool) -> Result<LoadStats> {
        self.load_from(reader, "<reader>", show_progress)
    }

    fn load_from<R: Read>(
        &self,
        reader: R,
        source: &str,
        show_progress: bool,
    ) -> Result<LoadStats> {
        let start_time = Instant::now();
        let mut stats = LoadStats::new();

        let progress_bar = show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message("Loading airports...");
            pb
        });

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        for (line, result) in csv_reader.records().enumerate() {
            stats.rows_read += 1;
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let error = Error::csv_parsing(
                        source,
                        format!("unreadable row {}", line + 1),
                        Some(e),
                    );
                    warn!("{}", error);
                    stats.add_skip(error.to_string());
                    continue;
                }
            };

            let row = match parse_airport_row(&record) {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping airport row {}: {}", line + 1, e);
                    stats.add_skip(format!("row {}: {}", line + 1, e));
                    continue;
                }
            };

            match self.add_airport(&row.iata, &row.latitude, &row.longitude) {
                Ok(_) => stats.airports_added += 1,
                Err(e) if e.kind() == ErrorKind::Conflict => {
                    debug!("Duplicate airport {} on row {}", row.iata, line + 1);
                    stats.duplicates += 1;
                }
                Err(e) => {
                    warn!("Skipping airport row {}: {}", line + 1, e);
                    stats.add_skip(format!("row {}: {}", line + 1, e));
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Airport loading complete");
        }

        stats.load_duration = start_time.elapsed();
        info!("{}", stats.summary());
        Ok(stats)
    }
}
