//! JSON encoding of activity collections.
//!
//! The persisted value is an array of objects:
//!
//! ```json
//! [{"id":"…","createdAt":"2024-03-05T09:12:44.118Z","coordinates":[38.7,-9.1],
//!   "distanceKm":5.0,"durationMin":25.0,"kind":"running","cadenceSpm":180.0}]
//! ```
//!
//! Derived metrics are not written. Decoding dispatches on `kind`, revalidates
//! the inputs and recomputes pace or speed, so a restored record behaves
//! exactly like the one that was saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::types::{ActivityId, ActivityKind, ActivityRecord, Coordinates};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredActivity {
    id: ActivityId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence_spm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elevation_gain_m: Option<f64>,
}

impl From<&ActivityRecord> for StoredActivity {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            id: record.id().clone(),
            created_at: record.created_at(),
            coordinates: record.coordinates(),
            distance_km: record.distance_km(),
            duration_min: record.duration_min(),
            kind: record.kind(),
            cadence_spm: record.cadence_spm(),
            elevation_gain_m: record.elevation_gain_m(),
        }
    }
}

impl StoredActivity {
    fn into_record(self) -> Result<ActivityRecord, CodecError> {
        let variant_value = match self.kind {
            ActivityKind::Running => self.cadence_spm.ok_or_else(|| {
                CodecError::Decode(format!("running activity {} has no cadenceSpm", self.id))
            })?,
            ActivityKind::Cycling => self.elevation_gain_m.ok_or_else(|| {
                CodecError::Decode(format!(
                    "cycling activity {} has no elevationGainM",
                    self.id
                ))
            })?,
        };

        let id = self.id.clone();
        ActivityRecord::restore(
            self.id,
            self.created_at,
            self.kind,
            self.coordinates,
            self.distance_km,
            self.duration_min,
            variant_value,
        )
        .map_err(|e| CodecError::Decode(format!("activity {}: {}", id, e)))
    }
}

/// Serialize activities for the persisted slot.
pub fn encode(records: &[ActivityRecord]) -> Result<String, CodecError> {
    let stored: Vec<StoredActivity> = records.iter().map(StoredActivity::from).collect();
    serde_json::to_string(&stored).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Rebuild typed activities from a persisted value.
pub fn decode(blob: &str) -> Result<Vec<ActivityRecord>, CodecError> {
    let stored: Vec<StoredActivity> =
        serde_json::from_str(blob).map_err(|e| CodecError::Decode(e.to_string()))?;

    stored.into_iter().map(StoredActivity::into_record).collect()
}

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Encode error: {0}")]
    Encode(String),

    /// Structurally invalid, truncated or inconsistent input
    #[error("Decode error: {0}")]
    Decode(String),
}
