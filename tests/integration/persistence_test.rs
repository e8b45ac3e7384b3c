//! Integration tests for persisting activities across sessions.
//!
//! Uses an on-disk SQLite database so every reopen goes through the real
//! slot, codec and store path.

use tempfile::TempDir;
use trailmark::activity::store::{open_database_store, ActivityStore, LoadOutcome};
use trailmark::activity::types::{ActivityKind, ActivityRecord, Coordinates};
use trailmark::storage::config::{load_config_from, AppConfig};
use trailmark::storage::database::Database;
use trailmark::storage::slot::KeyValueSlot;

const KEY: &str = "activities";

fn config_in(dir: &TempDir) -> AppConfig {
    load_config_from(&dir.path().join("config.toml")).unwrap()
}

#[test]
fn test_example_scenario_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let run = ActivityRecord::running(Coordinates::new(38.72, -9.14), 5.0, 25.0, 180.0).unwrap();
    let ride = ActivityRecord::cycling(Coordinates::new(38.70, -9.40), 20.0, 60.0, 150.0).unwrap();
    assert_eq!(run.pace_min_per_km(), Some(5.0));
    assert_eq!(ride.speed_km_per_h(), Some(20.0));

    {
        let mut store = open_database_store(&config).unwrap();
        assert_eq!(store.load_outcome(), &LoadOutcome::NothingStored);
        store.add(run.clone()).unwrap();
        store.add(ride.clone()).unwrap();
    }

    let store = open_database_store(&config).unwrap();
    assert_eq!(store.load_outcome(), &LoadOutcome::Restored(2));

    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], run);
    assert_eq!(list[1], ride);

    assert_eq!(list[0].kind(), ActivityKind::Running);
    assert_eq!(list[0].cadence_spm(), Some(180.0));
    assert_eq!(list[0].pace_min_per_km(), Some(5.0));
    assert_eq!(list[1].kind(), ActivityKind::Cycling);
    assert_eq!(list[1].elevation_gain_m(), Some(150.0));
    assert_eq!(list[1].speed_km_per_h(), Some(20.0));

    assert_eq!(store.find_by_id(run.id()).unwrap(), &run);
}

#[test]
fn test_corrupt_database_value_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trailmark.db");

    {
        let mut db = Database::open(&path).unwrap();
        db.write(KEY, "[{\"id\":\"1\",\"createdAt\":").unwrap();
    }

    let mut store = ActivityStore::open(Database::open(&path).unwrap(), KEY);
    assert!(store.is_empty());
    assert!(matches!(
        store.load_outcome(),
        LoadOutcome::PersistenceCorrupt(_)
    ));

    // The store stays usable and overwrites the bad value on the next add
    let run = ActivityRecord::running(Coordinates::new(1.0, 1.0), 3.0, 18.0, 165.0).unwrap();
    store.add(run.clone()).unwrap();

    let reopened = ActivityStore::open(Database::open(&path).unwrap(), KEY);
    assert_eq!(reopened.list(), &[run]);
}

#[test]
fn test_clear_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    {
        let mut store = open_database_store(&config).unwrap();
        store
            .add(ActivityRecord::running(Coordinates::new(2.0, 2.0), 4.0, 22.0, 172.0).unwrap())
            .unwrap();
        store.clear().unwrap();
    }

    let store = open_database_store(&config).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.load_outcome(), &LoadOutcome::NothingStored);
}

#[test]
fn test_collections_under_different_keys_are_separate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trailmark.db");

    let mut first = ActivityStore::open(Database::open(&path).unwrap(), "first");
    first
        .add(ActivityRecord::cycling(Coordinates::new(3.0, 3.0), 15.0, 45.0, 0.0).unwrap())
        .unwrap();

    let second = ActivityStore::open(Database::open(&path).unwrap(), "second");
    assert!(second.is_empty());
    assert_eq!(second.key(), "second");
}
