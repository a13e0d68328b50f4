//! Boundary tests for the per-kind acceptance ranges

use super::*;
use crate::app::models::{AtmosphericRecord, MeasurementKind};
use crate::app::services::update_engine::{UpdateEngine, UpdateOutcome};

fn outcome(kind: MeasurementKind, mean: f64) -> UpdateOutcome {
    UpdateEngine::default()
        .apply_kind_at(&mut AtmosphericRecord::new(), kind, measurement(mean), fixed_time())
        .unwrap()
}

#[test]
fn test_wind_has_no_upper_bound() {
    assert_eq!(outcome(MeasurementKind::Wind, 0.0), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Wind, 1.0e6), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Wind, -0.1), UpdateOutcome::Ignored);
}

#[test]
fn test_temperature_bounds() {
    assert_eq!(outcome(MeasurementKind::Temperature, -50.0), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Temperature, 99.9), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Temperature, -50.1), UpdateOutcome::Ignored);
    assert_eq!(outcome(MeasurementKind::Temperature, 100.0), UpdateOutcome::Ignored);
}

#[test]
fn test_pressure_bounds() {
    assert_eq!(outcome(MeasurementKind::Pressure, 650.0), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Pressure, 799.0), UpdateOutcome::Applied);
    assert_eq!(outcome(MeasurementKind::Pressure, 649.9), UpdateOutcome::Ignored);
    assert_eq!(outcome(MeasurementKind::Pressure, 800.0), UpdateOutcome::Ignored);
}

#[test]
fn test_percentage_kinds_bounds() {
    for kind in [
        MeasurementKind::Humidity,
        MeasurementKind::CloudCover,
        MeasurementKind::Precipitation,
    ] {
        assert_eq!(outcome(kind, 0.0), UpdateOutcome::Applied, "{}", kind);
        assert_eq!(outcome(kind, 99.5), UpdateOutcome::Applied, "{}", kind);
        assert_eq!(outcome(kind, -1.0), UpdateOutcome::Ignored, "{}", kind);
        assert_eq!(outcome(kind, 100.0), UpdateOutcome::Ignored, "{}", kind);
    }
}

#[test]
fn test_nan_mean_is_never_accepted() {
    for kind in MeasurementKind::ALL {
        assert_eq!(outcome(kind, f64::NAN), UpdateOutcome::Ignored, "{}", kind);
    }
}

#[test]
fn test_each_kind_lands_in_its_own_slot() {
    for kind in MeasurementKind::ALL {
        let (lower, _) = kind.acceptance_range();
        let point = measurement(lower);
        let mut record = AtmosphericRecord::new();

        let result = UpdateEngine::default().apply_kind_at(&mut record, kind, point, fixed_time());

        assert_eq!(result.unwrap(), UpdateOutcome::Applied, "{}", kind);
        assert_eq!(record.get(kind), Some(&point), "{}", kind);
        assert_eq!(record.measurement_count(), 1, "{}", kind);
        for other in MeasurementKind::ALL.into_iter().filter(|other| *other != kind) {
            assert!(record.get(other).is_none(), "{} leaked into {}", kind, other);
        }
    }
}

#[test]
fn test_ignored_value_leaves_slot_empty() {
    for kind in MeasurementKind::ALL {
        let mut record = AtmosphericRecord::new();
        let (lower, _) = kind.acceptance_range();

        let outcome = UpdateEngine::default()
            .apply_kind_at(&mut record, kind, measurement(lower - 1.0), fixed_time())
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Ignored, "{}", kind);
        assert!(record.get(kind).is_none(), "{}", kind);
        assert!(record.last_update_time.is_none(), "{}", kind);
    }
}
