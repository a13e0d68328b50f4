//! Airport loading statistics

/// Statistics about an airport file load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadStats {
    /// Number of rows read from the file
    pub rows_read: usize,

    /// Number of airports registered
    pub airports_added: usize,

    /// Rows naming an airport that was already registered
    pub duplicates: usize,

    /// Rows skipped because they could not be parsed or validated
    pub rows_skipped: usize,

    /// Time taken to load the file
    pub load_duration: std::time::Duration,

    /// Any errors encountered during loading
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self {
            rows_read: 0,
            airports_added: 0,
            duplicates: 0,
            rows_skipped: 0,
            load_duration: std::time::Duration::ZERO,
            errors: Vec::new(),
        }
    }

    /// Record a skipped row and its reason
    pub fn add_skip(&mut self, message: String) {
        self.rows_skipped += 1;
        self.errors.push(message);
    }

    /// Check if any rows were skipped
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Percentage of rows that produced a new airport
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.airports_added as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} rows, added {} airports ({:.1}%), {} duplicates, {} skipped in {:.2}s",
            self.rows_read,
            self.airports_added,
            self.success_rate(),
            self.duplicates,
            self.rows_skipped,
            self.load_duration.as_secs_f64()
        )
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
