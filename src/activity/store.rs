//! In-memory activity store backed by a persisted key/value slot.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{ActivityId, ActivityRecord};
use crate::storage::codec::{self, CodecError};
use crate::storage::config::AppConfig;
use crate::storage::database::Database;
use crate::storage::slot::{KeyValueSlot, StorageError};

/// Result of restoring persisted activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was persisted under the key
    NothingStored,
    /// This many activities were restored
    Restored(usize),
    /// Persisted data existed but could not be decoded; the store started empty
    PersistenceCorrupt(String),
    /// The slot could not be read; the store started empty
    Unavailable(String),
}

impl LoadOutcome {
    /// Whether persisted data was lost or unreadable.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            LoadOutcome::PersistenceCorrupt(_) | LoadOutcome::Unavailable(_)
        )
    }
}

/// Ordered collection of activities for one session.
///
/// Insertion order is the order activities were added. Every successful
/// [`add`](ActivityStore::add) rewrites the full collection to the slot.
/// Ids removed by [`clear`](ActivityStore::clear) stay taken for the lifetime
/// of the store.
pub struct ActivityStore<S: KeyValueSlot> {
    slot: S,
    key: String,
    activities: Vec<ActivityRecord>,
    index: HashMap<ActivityId, usize>,
    retired: HashSet<ActivityId>,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueSlot> ActivityStore<S> {
    /// Create a store on the given slot and restore whatever is persisted under `key`.
    pub fn open(slot: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            slot,
            key: key.into(),
            activities: Vec::new(),
            index: HashMap::new(),
            retired: HashSet::new(),
            load_outcome: LoadOutcome::NothingStored,
        };
        store.load_from_persistence();
        store
    }

    /// Replace the in-memory activities with the persisted ones.
    ///
    /// Never fails: missing data yields an empty store, and malformed data
    /// yields an empty store plus a [`LoadOutcome::PersistenceCorrupt`] diagnostic.
    pub fn load_from_persistence(&mut self) -> &LoadOutcome {
        self.activities.clear();
        self.index.clear();

        let outcome = match self.slot.read(&self.key) {
            Ok(None) => LoadOutcome::NothingStored,
            Ok(Some(blob)) => match codec::decode(&blob) {
                Ok(records) => match self.replace_all(records) {
                    Ok(count) => LoadOutcome::Restored(count),
                    Err(reason) => LoadOutcome::PersistenceCorrupt(reason),
                },
                Err(e) => LoadOutcome::PersistenceCorrupt(e.to_string()),
            },
            Err(e) => LoadOutcome::Unavailable(e.to_string()),
        };

        match &outcome {
            LoadOutcome::NothingStored => {
                tracing::info!(key = %self.key, "No persisted activities")
            }
            LoadOutcome::Restored(count) => {
                tracing::info!(key = %self.key, count, "Restored persisted activities")
            }
            LoadOutcome::PersistenceCorrupt(reason) => {
                tracing::warn!(key = %self.key, %reason, "Persisted activities are corrupt, starting empty")
            }
            LoadOutcome::Unavailable(reason) => {
                tracing::warn!(key = %self.key, %reason, "Could not read persisted activities, starting empty")
            }
        }

        self.load_outcome = outcome;
        &self.load_outcome
    }

    /// Outcome of the most recent load.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Append an activity and persist the full collection.
    ///
    /// If the write fails the activity is not kept. Ids already used in this
    /// store, including cleared ones, are rejected.
    pub fn add(&mut self, record: ActivityRecord) -> Result<&ActivityRecord, StoreError> {
        if self.index.contains_key(record.id()) || self.retired.contains(record.id()) {
            return Err(StoreError::DuplicateId(record.id().clone()));
        }

        let id = record.id().clone();
        self.activities.push(record);

        if let Err(e) = self.persist() {
            self.activities.pop();
            return Err(e);
        }

        let position = self.activities.len() - 1;
        self.index.insert(id.clone(), position);
        tracing::debug!(%id, total = self.activities.len(), "Added activity");

        Ok(&self.activities[position])
    }

    /// All activities in insertion order.
    pub fn list(&self) -> &[ActivityRecord] {
        &self.activities
    }

    /// Look up an activity by id.
    pub fn find_by_id(&self, id: &ActivityId) -> Result<&ActivityRecord, StoreError> {
        self.index
            .get(id)
            .and_then(|&position| self.activities.get(position))
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Remove every activity and erase the persisted collection.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.slot.remove(&self.key)?;
        self.activities.clear();
        self.retired.extend(self.index.drain().map(|(id, _)| id));
        tracing::info!(key = %self.key, "Cleared all activities");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Key the collection is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Give back the underlying slot.
    pub fn into_slot(self) -> S {
        self.slot
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let blob = codec::encode(&self.activities)?;
        self.slot.write(&self.key, &blob)?;
        Ok(())
    }

    /// Install decoded records, rejecting collections with repeated ids.
    fn replace_all(&mut self, records: Vec<ActivityRecord>) -> Result<usize, String> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id().clone(), position).is_some() {
                return Err(format!("duplicate activity id {}", record.id()));
            }
        }

        let count = records.len();
        self.activities = records;
        self.index = index;
        Ok(count)
    }
}

/// Open the store described by the configuration, on its SQLite database.
pub fn open_database_store(config: &AppConfig) -> Result<ActivityStore<Database>, StorageError> {
    let database = Database::open(&config.database_path())?;
    Ok(ActivityStore::open(database, config.storage.collection_key.clone()))
}

/// Activity store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An activity with this id is already stored
    #[error("Duplicate activity id: {0}")]
    DuplicateId(ActivityId),

    /// No activity with this id
    #[error("Activity not found: {0}")]
    NotFound(ActivityId),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
