//! Raw form input and its validation.

use crate::activity::types::{
    validate_measurements, ActivityError, ActivityKind, ActivityRecord, Coordinates,
};

/// Field values as typed into the activity form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawActivityInput {
    /// "running" or "cycling"
    pub kind: String,
    pub distance: String,
    pub duration: String,
    /// Only read for running
    pub cadence: String,
    /// Only read for cycling
    pub elevation: String,
}

/// Validated numeric input for one activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityInput {
    pub kind: ActivityKind,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence for running, elevation gain for cycling
    pub variant_value: f64,
}

impl RawActivityInput {
    /// Form input for a running activity.
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: ActivityKind::Running.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    /// Form input for a cycling activity.
    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: ActivityKind::Cycling.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }

    /// Parse and validate the fields relevant to the selected kind.
    pub fn parse(&self) -> Result<ActivityInput, ActivityError> {
        let kind: ActivityKind = self.kind.parse()?;
        let distance_km = parse_number("distance", &self.distance)?;
        let duration_min = parse_number("duration", &self.duration)?;
        let variant_value = match kind {
            ActivityKind::Running => parse_number("cadence", &self.cadence)?,
            ActivityKind::Cycling => parse_number("elevation gain", &self.elevation)?,
        };

        validate_measurements(kind, distance_km, duration_min, variant_value)?;

        Ok(ActivityInput {
            kind,
            distance_km,
            duration_min,
            variant_value,
        })
    }
}

impl ActivityInput {
    /// Build the activity at the given location.
    pub fn into_record(self, coordinates: Coordinates) -> Result<ActivityRecord, ActivityError> {
        ActivityRecord::new(
            self.kind,
            coordinates,
            self.distance_km,
            self.duration_min,
            self.variant_value,
        )
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, ActivityError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ActivityError::InvalidInput(format!("{} is required", field)));
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| ActivityError::InvalidInput(format!("{} is not a number: '{}'", field, trimmed)))
}
