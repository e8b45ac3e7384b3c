//! Unit tests for the persisted activity format.

use chrono::{TimeZone, Utc};
use trailmark::activity::types::{ActivityId, ActivityKind, ActivityRecord, Coordinates};
use trailmark::storage::codec::{decode, encode, CodecError};

#[test]
fn test_decodes_hand_written_collection() {
    let blob = r#"[
        {"id":"1709630000","createdAt":"2024-03-05T09:13:20.123Z","coordinates":[38.72,-9.14],
         "distanceKm":5.2,"durationMin":24,"kind":"running","cadenceSpm":178},
        {"id":"1709716400","createdAt":"2024-03-06T09:13:20Z","coordinates":[38.7,-9.2],
         "distanceKm":27,"durationMin":95,"kind":"cycling","elevationGainM":523}
    ]"#;

    let records = decode(blob).unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id(), &ActivityId::from("1709630000"));
    assert_eq!(records[0].kind(), ActivityKind::Running);
    assert_eq!(records[0].cadence_spm(), Some(178.0));
    assert_eq!(records[0].pace_min_per_km(), Some(24.0 / 5.2));
    assert_eq!(
        records[0].created_at(),
        Utc.with_ymd_and_hms(2024, 3, 5, 9, 13, 20).unwrap() + chrono::Duration::milliseconds(123)
    );

    assert_eq!(records[1].kind(), ActivityKind::Cycling);
    assert_eq!(records[1].elevation_gain_m(), Some(523.0));
    assert_eq!(records[1].speed_km_per_h(), Some(27.0 / (95.0 / 60.0)));
}

#[test]
fn test_round_trip_with_awkward_floats() {
    let records = vec![
        ActivityRecord::running(
            Coordinates::new(0.1 + 0.2, -179.999999),
            1.0 / 3.0,
            2.0 / 7.0,
            163.3,
        )
        .unwrap(),
        ActivityRecord::cycling(Coordinates::new(-89.5, 0.0), 1e-3, 1e-2, -0.000001).unwrap(),
    ];

    let decoded = decode(&encode(&records).unwrap()).unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn test_decoded_records_keep_their_metric() {
    let original = ActivityRecord::restore(
        ActivityId::from("x"),
        Utc.with_ymd_and_hms(2023, 11, 1, 7, 0, 0).unwrap(),
        ActivityKind::Cycling,
        Coordinates::new(40.0, -3.7),
        42.0,
        84.0,
        610.0,
    )
    .unwrap();

    let decoded = decode(&encode(&[original.clone()]).unwrap()).unwrap();
    let speed = decoded[0].speed_km_per_h().unwrap();
    assert!((speed - 30.0).abs() < 1e-9);
    assert_eq!(decoded[0].details(), original.details());
}

#[test]
fn test_garbage_is_decode_failure() {
    for blob in ["[", "{\"id\":1}", "[{\"kind\":\"running\"}]", "\u{0}"] {
        assert!(matches!(decode(blob), Err(CodecError::Decode(_))));
    }
}
