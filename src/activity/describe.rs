//! Human-readable labels and list view models for activities.

use chrono::{Datelike, FixedOffset, Offset, Utc};

use super::types::{ActivityDetails, ActivityId, ActivityKind, ActivityRecord};

const MONTHS: [&str; 12] = [
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

/// Describe an activity by kind and creation date in UTC, e.g. "Running on March 5".
pub fn describe(record: &ActivityRecord) -> String {
    describe_with_offset(record, Utc.fix())
}

/// Describe an activity using the calendar date at the given UTC offset.
pub fn describe_with_offset(record: &ActivityRecord, offset: FixedOffset) -> String {
    let date = record.created_at().with_timezone(&offset);
    format!(
        "{} on {} {}",
        record.kind().label(),
        MONTHS[date.month0() as usize],
        date.day()
    )
}

/// Marker popup text: the kind icon followed by the description.
pub fn popup_text(record: &ActivityRecord, offset: FixedOffset) -> String {
    format!(
        "{} {}",
        record.kind().icon(),
        describe_with_offset(record, offset)
    )
}

/// One value row of a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl DetailLine {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Everything a list view needs to display one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub title: String,
    pub icon: &'static str,
    /// Distance, duration, derived metric, kind-specific input
    pub details: Vec<DetailLine>,
}

/// Build the list view model for an activity.
pub fn summarize(record: &ActivityRecord, offset: FixedOffset) -> ActivitySummary {
    let kind = record.kind();
    let mut details = vec![
        DetailLine::new(kind.icon(), record.distance_km().to_string(), "km"),
        DetailLine::new("⏱", record.duration_min().to_string(), "min"),
    ];

    match *record.details() {
        ActivityDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => {
            details.push(DetailLine::new("⚡️", format!("{:.1}", pace_min_per_km), "min/km"));
            details.push(DetailLine::new("🦶🏼", cadence_spm.to_string(), "spm"));
        }
        ActivityDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => {
            details.push(DetailLine::new("⚡️", format!("{:.1}", speed_km_per_h), "km/h"));
            details.push(DetailLine::new("⛰", elevation_gain_m.to_string(), "m"));
        }
    }

    ActivitySummary {
        id: record.id().clone(),
        kind,
        title: describe_with_offset(record, offset),
        icon: kind.icon(),
        details,
    }
}
