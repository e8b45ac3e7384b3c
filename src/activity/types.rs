//! Activity record types and derived metrics.
//!
//! A record is built once, validated at construction, and never mutated
//! afterwards. The kind-specific input and its derived metric live together in
//! [`ActivityDetails`], so a record can never carry a cadence without a pace or
//! an elevation gain without a speed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of an activity, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Generate a fresh identifier.
    ///
    /// Backed by a random v4 UUID, so two calls never collide even when they
    /// land in the same millisecond.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActivityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a two-element `[lat, lng]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and inside the valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.latitude, coords.longitude]
    }
}

/// Kind of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Cycling,
}

impl ActivityKind {
    /// Lowercase tag used in storage and form values.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Cycling => "cycling",
        }
    }

    /// Capitalized label used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::Cycling => "Cycling",
        }
    }

    /// Icon shown on markers and list entries.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Running => "🏃‍♂️",
            ActivityKind::Cycling => "🚴‍♀️",
        }
    }

    /// The extra form field this kind needs.
    pub fn variant_field(&self) -> VariantField {
        match self {
            ActivityKind::Running => VariantField::Cadence,
            ActivityKind::Cycling => VariantField::ElevationGain,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(ActivityKind::Running),
            "cycling" => Ok(ActivityKind::Cycling),
            other => Err(ActivityError::InvalidInput(format!(
                "unknown activity kind '{}'",
                other
            ))),
        }
    }
}

/// Kind-specific input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantField {
    /// Running cadence in steps per minute
    Cadence,
    /// Cycling elevation gain in meters (may be negative)
    ElevationGain,
}

impl VariantField {
    /// Human-readable field name.
    pub fn label(&self) -> &'static str {
        match self {
            VariantField::Cadence => "cadence",
            VariantField::ElevationGain => "elevation gain",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            VariantField::Cadence => "spm",
            VariantField::ElevationGain => "m",
        }
    }
}

/// Kind-specific payload with its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityDetails {
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Minutes per kilometer
        pace_min_per_km: f64,
    },
    Cycling {
        /// Meters climbed (negative for a net descent)
        elevation_gain_m: f64,
        /// Kilometers per hour
        speed_km_per_h: f64,
    },
}

/// Pace in minutes per kilometer.
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Speed in kilometers per hour.
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// Check the numeric inputs of an activity against the rules of its kind.
///
/// Distance and duration must be finite and strictly positive. Cadence must be
/// finite and strictly positive; elevation gain only has to be finite.
pub fn validate_measurements(
    kind: ActivityKind,
    distance_km: f64,
    duration_min: f64,
    variant_value: f64,
) -> Result<(), ActivityError> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(ActivityError::InvalidInput(
            "distance must be a positive number".to_string(),
        ));
    }
    if !duration_min.is_finite() || duration_min <= 0.0 {
        return Err(ActivityError::InvalidInput(
            "duration must be a positive number".to_string(),
        ));
    }

    match kind {
        ActivityKind::Running if !variant_value.is_finite() || variant_value <= 0.0 => Err(
            ActivityError::InvalidInput("cadence must be a positive number".to_string()),
        ),
        ActivityKind::Cycling if !variant_value.is_finite() => Err(ActivityError::InvalidInput(
            "elevation gain must be a number".to_string(),
        )),
        _ => Ok(()),
    }
}

/// A single logged running or cycling session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    id: ActivityId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    details: ActivityDetails,
}

impl ActivityRecord {
    /// Create a new activity with a fresh id and the current time.
    ///
    /// `variant_value` is the cadence for running and the elevation gain for
    /// cycling.
    pub fn new(
        kind: ActivityKind,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        variant_value: f64,
    ) -> Result<Self, ActivityError> {
        Self::restore(
            ActivityId::generate(),
            Utc::now(),
            kind,
            coordinates,
            distance_km,
            duration_min,
            variant_value,
        )
    }

    /// Create a new running activity.
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<Self, ActivityError> {
        Self::new(
            ActivityKind::Running,
            coordinates,
            distance_km,
            duration_min,
            cadence_spm,
        )
    }

    /// Create a new cycling activity.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, ActivityError> {
        Self::new(
            ActivityKind::Cycling,
            coordinates,
            distance_km,
            duration_min,
            elevation_gain_m,
        )
    }

    /// Rebuild a record whose id and creation time were assigned earlier.
    ///
    /// Inputs go through the same validation as [`ActivityRecord::new`] and the
    /// derived metric is recomputed from them.
    pub fn restore(
        id: ActivityId,
        created_at: DateTime<Utc>,
        kind: ActivityKind,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        variant_value: f64,
    ) -> Result<Self, ActivityError> {
        if !coordinates.is_valid() {
            return Err(ActivityError::InvalidInput(format!(
                "coordinates out of range: [{}, {}]",
                coordinates.latitude, coordinates.longitude
            )));
        }
        validate_measurements(kind, distance_km, duration_min, variant_value)?;

        let details = match kind {
            ActivityKind::Running => ActivityDetails::Running {
                cadence_spm: variant_value,
                pace_min_per_km: pace_min_per_km(distance_km, duration_min),
            },
            ActivityKind::Cycling => ActivityDetails::Cycling {
                elevation_gain_m: variant_value,
                speed_km_per_h: speed_km_per_h(distance_km, duration_min),
            },
        };

        let metric = match details {
            ActivityDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            ActivityDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        };
        if !metric.is_finite() {
            return Err(ActivityError::InvalidInput(format!(
                "{} km in {} min gives an unrepresentable {}",
                distance_km,
                duration_min,
                if kind == ActivityKind::Running { "pace" } else { "speed" }
            )));
        }

        Ok(Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details,
        })
    }

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn details(&self) -> &ActivityDetails {
        &self.details
    }

    /// Discriminant derived from the payload.
    pub fn kind(&self) -> ActivityKind {
        match self.details {
            ActivityDetails::Running { .. } => ActivityKind::Running,
            ActivityDetails::Cycling { .. } => ActivityKind::Cycling,
        }
    }

    /// The kind-specific input: cadence or elevation gain.
    pub fn variant_value(&self) -> f64 {
        match self.details {
            ActivityDetails::Running { cadence_spm, .. } => cadence_spm,
            ActivityDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }

    /// Cadence, for running activities.
    pub fn cadence_spm(&self) -> Option<f64> {
        match self.details {
            ActivityDetails::Running { cadence_spm, .. } => Some(cadence_spm),
            ActivityDetails::Cycling { .. } => None,
        }
    }

    /// Pace, for running activities.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            ActivityDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            ActivityDetails::Cycling { .. } => None,
        }
    }

    /// Elevation gain, for cycling activities.
    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            ActivityDetails::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            ActivityDetails::Running { .. } => None,
        }
    }

    /// Speed, for cycling activities.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            ActivityDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            ActivityDetails::Running { .. } => None,
        }
    }
}

/// Errors from building activities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActivityError {
    /// Non-finite, non-positive or malformed input
    #[error("Invalid activity input: {0}")]
    InvalidInput(String),
}
