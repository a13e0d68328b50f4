//! Airport registry service for O(1) airport and atmospheric lookups
//!
//! The registry maps IATA codes to an airport and its atmospheric record.
//! Both live in the same map entry, so an airport and its record are
//! always created and removed together by a single map operation.
//!
//! All operations are safe to call concurrently from many threads. Bulk
//! views (`all`, `records`, `entries`) walk the map shard by shard and are
//! only weakly consistent: airports added or removed while a view is being
//! built may or may not appear in it.

use crate::app::models::{Airport, AtmosphericRecord};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::HashSet;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Outcome of registering an airport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Outcome of removing an airport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Outcome of replacing an atmospheric record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    NotFound,
}

/// An airport paired with its atmospheric record
#[derive(Debug, Clone)]
struct AirportEntry {
    airport: Airport,
    record: AtmosphericRecord,
}

/// Concurrent registry of airports and their atmospheric records
#[derive(Debug, Default)]
pub struct AirportRegistry {
    /// Entries indexed by IATA code
    entries: DashMap<String, AirportEntry>,
}

impl AirportRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register an airport with an empty atmospheric record if its code is free
    ///
    /// Concurrent adds for the same code resolve so that exactly one returns
    /// `AddOutcome::Added`. An existing airport is never overwritten.
    pub fn add(&self, airport: Airport) -> AddOutcome {
        match self.entries.entry(airport.iata.clone()) {
            Entry::Occupied(_) => {
                debug!("Airport {} already registered", airport.iata);
                AddOutcome::AlreadyExists
            }
            Entry::Vacant(vacant) => {
                debug!("Registering airport {}", airport);
                vacant.insert(AirportEntry {
                    airport,
                    record: AtmosphericRecord::new(),
                });
                AddOutcome::Added
            }
        }
    }

    /// Remove an airport together with its atmospheric record
    pub fn remove(&self, iata: &str) -> RemoveOutcome {
        match self.entries.remove(iata) {
            Some(_) => {
                debug!("Removed airport {}", iata);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Get airport data by IATA code
    pub fn find(&self, iata: &str) -> Option<Airport> {
        self.entries.get(iata).map(|entry| entry.airport.clone())
    }

    /// Get the atmospheric record of an airport
    pub fn find_atmospheric(&self, iata: &str) -> Option<AtmosphericRecord> {
        self.entries.get(iata).map(|entry| entry.record.clone())
    }

    /// Check if an airport is registered
    pub fn contains(&self, iata: &str) -> bool {
        self.entries.contains_key(iata)
    }

    /// Replace an airport's atmospheric record if the airport still exists
    pub fn update_atmospheric(&self, iata: &str, record: AtmosphericRecord) -> UpdateStatus {
        match self.entries.get_mut(iata) {
            Some(mut entry) => {
                entry.record = record;
                UpdateStatus::Updated
            }
            None => UpdateStatus::NotFound,
        }
    }

    /// Modify an airport's atmospheric record in place
    ///
    /// The closure runs while the entry is locked, so concurrent writers to
    /// the same airport cannot interleave. Returns `None` if the airport is
    /// not registered.
    pub fn update_with<R>(
        &self,
        iata: &str,
        f: impl FnOnce(&mut AtmosphericRecord) -> R,
    ) -> Option<R> {
        self.entries
            .get_mut(iata)
            .map(|mut entry| f(&mut entry.record))
    }

    /// All registered airports
    pub fn all(&self) -> HashSet<Airport> {
        self.entries
            .iter()
            .map(|entry| entry.airport.clone())
            .collect()
    }

    /// IATA codes of all registered airports
    pub fn iata_codes(&self) -> HashSet<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Atmospheric records of all registered airports
    pub fn records(&self) -> Vec<AtmosphericRecord> {
        self.entries
            .iter()
            .map(|entry| entry.record.clone())
            .collect()
    }

    /// Airports paired with their atmospheric records
    pub fn entries(&self) -> Vec<(Airport, AtmosphericRecord)> {
        self.entries
            .iter()
            .map(|entry| (entry.airport.clone(), entry.record.clone()))
            .collect()
    }

    /// Get the total number of airports in the registry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no airports
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
