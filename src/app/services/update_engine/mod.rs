//! Measurement validation and application
//!
//! The update engine checks a reported measurement against the accepted
//! range of its kind and writes it over the previous value of that kind's
//! slot. A measurement is stored whole or not at all.

use crate::app::models::{AtmosphericRecord, Measurement, MeasurementKind};
use crate::config::OutOfRangePolicy;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

#[cfg(test)]
pub mod tests;

/// What happened to a measurement that passed kind validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Stored, and the record's update time moved forward
    Applied,
    /// Mean outside the accepted range; record left untouched
    Ignored,
}

/// Applies measurements to atmospheric records
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateEngine {
    policy: OutOfRangePolicy,
}

impl UpdateEngine {
    /// Create an update engine with the given out-of-range policy
    pub fn new(policy: OutOfRangePolicy) -> Self {
        Self { policy }
    }

    /// Policy applied to out-of-range means
    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    /// Apply a measurement named by kind string, stamping the current time
    ///
    /// # Errors
    /// * `Error::InvalidMeasurementKind` if `kind` names no measurement kind
    /// * `Error::MeasurementOutOfRange` if the mean is out of range and the
    ///   policy is `Reject`
    pub fn apply(
        &self,
        record: AtmosphericRecord,
        kind: &str,
        point: Measurement,
    ) -> Result<AtmosphericRecord> {
        self.apply_at(record, kind, point, Utc::now())
    }

    /// Apply a measurement named by kind string at an explicit time
    pub fn apply_at(
        &self,
        mut record: AtmosphericRecord,
        kind: &str,
        point: Measurement,
        now: DateTime<Utc>,
    ) -> Result<AtmosphericRecord> {
        let kind = kind.parse::<MeasurementKind>().inspect_err(|_| {
            warn!(
                "Measurement kind '{}' does not match any of {:?}",
                kind,
                MeasurementKind::ALL.map(|k| k.name())
            );
        })?;
        self.apply_kind_at(&mut record, kind, point, now)?;
        Ok(record)
    }

    /// Apply a measurement of a known kind in place
    ///
    /// On acceptance the slot is overwritten and `last_update_time` set to
    /// `now`. An out-of-range mean leaves the record unchanged and yields
    /// `UpdateOutcome::Ignored`, or an error under the `Reject` policy.
    pub fn apply_kind_at(
        &self,
        record: &mut AtmosphericRecord,
        kind: MeasurementKind,
        point: Measurement,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        if !kind.accepts(point.mean) {
            return match self.policy {
                OutOfRangePolicy::Ignore => {
                    debug!(
                        "Ignoring {} measurement with mean {} outside accepted range {:?}",
                        kind,
                        point.mean,
                        kind.acceptance_range()
                    );
                    Ok(UpdateOutcome::Ignored)
                }
                OutOfRangePolicy::Reject => {
                    Err(Error::measurement_out_of_range(kind, point.mean))
                }
            };
        }

        record.set(kind, point);
        record.last_update_time = Some(now);
        Ok(UpdateOutcome::Applied)
    }
}
