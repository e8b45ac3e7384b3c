//! Unit tests for activity descriptions.

use chrono::{FixedOffset, TimeZone, Utc};
use trailmark::activity::describe::{describe, describe_with_offset};
use trailmark::activity::types::{ActivityId, ActivityKind, ActivityRecord, Coordinates};

fn record(kind: ActivityKind, month: u32, day: u32) -> ActivityRecord {
    ActivityRecord::restore(
        ActivityId::from(format!("{}-{}-{}", kind, month, day)),
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap(),
        kind,
        Coordinates::new(0.0, 0.0),
        10.0,
        60.0,
        90.0,
    )
    .unwrap()
}

#[test]
fn test_every_month_name() {
    let expected = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    for (index, month) in expected.iter().enumerate() {
        let record = record(ActivityKind::Cycling, index as u32 + 1, 1);
        assert_eq!(describe(&record), format!("Cycling on {} 1", month));
    }
}

#[test]
fn test_running_on_march_5() {
    assert_eq!(
        describe(&record(ActivityKind::Running, 3, 5)),
        "Running on March 5"
    );
}

#[test]
fn test_description_ignores_measurements() {
    let a = record(ActivityKind::Running, 8, 21);
    let b = ActivityRecord::restore(
        a.id().clone(),
        a.created_at(),
        ActivityKind::Running,
        Coordinates::new(10.0, 10.0),
        3.0,
        18.0,
        150.0,
    )
    .unwrap();
    assert_eq!(describe(&a), describe(&b));
}

#[test]
fn test_negative_offset_moves_to_previous_day() {
    let record = ActivityRecord::restore(
        ActivityId::from("early"),
        Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap(),
        ActivityKind::Running,
        Coordinates::new(0.0, 0.0),
        5.0,
        30.0,
        170.0,
    )
    .unwrap();
    let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();

    assert_eq!(describe_with_offset(&record, minus_five), "Running on April 30");
}
