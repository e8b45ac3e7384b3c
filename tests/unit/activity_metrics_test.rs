//! Unit tests for activity construction and derived metrics.

use trailmark::activity::types::{ActivityError, ActivityKind, ActivityRecord, Coordinates};

fn start() -> Coordinates {
    Coordinates::new(59.33, 18.06)
}

#[test]
fn test_pace_across_inputs() {
    let inputs = [(5.0, 25.0), (10.0, 52.5), (0.4, 1.9), (42.195, 215.0)];

    for (distance, duration) in inputs {
        let run = ActivityRecord::running(start(), distance, duration, 170.0).unwrap();
        let pace = run.pace_min_per_km().unwrap();
        assert!(
            (pace - duration / distance).abs() < 1e-9,
            "pace mismatch for {} km in {} min",
            distance,
            duration
        );
    }
}

#[test]
fn test_speed_across_inputs() {
    let inputs = [(20.0, 60.0), (42.0, 95.0), (3.3, 7.5), (160.9, 300.0)];

    for (distance, duration) in inputs {
        let ride = ActivityRecord::cycling(start(), distance, duration, 80.0).unwrap();
        let speed = ride.speed_km_per_h().unwrap();
        assert!(
            (speed - distance / (duration / 60.0)).abs() < 1e-9,
            "speed mismatch for {} km in {} min",
            distance,
            duration
        );
    }
}

#[test]
fn test_zero_and_negative_inputs_rejected() {
    for kind in [ActivityKind::Running, ActivityKind::Cycling] {
        for (distance, duration) in [(0.0, 30.0), (-5.0, 30.0), (5.0, 0.0)] {
            let result = ActivityRecord::new(kind, start(), distance, duration, 150.0);
            assert!(
                matches!(result, Err(ActivityError::InvalidInput(_))),
                "{} accepted {} km / {} min",
                kind,
                distance,
                duration
            );
        }
    }
}

#[test]
fn test_ids_unique_in_tight_loop() {
    let mut ids = std::collections::HashSet::new();
    for _ in 0..1000 {
        let run = ActivityRecord::running(start(), 1.0, 6.0, 160.0).unwrap();
        assert!(ids.insert(run.id().clone()));
    }
}

#[test]
fn test_variant_value_follows_kind() {
    let run = ActivityRecord::running(start(), 8.0, 40.0, 176.0).unwrap();
    let ride = ActivityRecord::cycling(start(), 8.0, 40.0, -20.0).unwrap();

    assert_eq!(run.variant_value(), 176.0);
    assert_eq!(ride.variant_value(), -20.0);
    assert_eq!(run.kind().variant_field().unit(), "spm");
    assert_eq!(ride.kind().variant_field().unit(), "m");
}
