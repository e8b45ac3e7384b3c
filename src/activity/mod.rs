//! Activity module.
//!
//! Running and cycling records with their derived metrics, human-readable
//! descriptions, and the session's ordered store.

pub mod describe;
pub mod store;
pub mod types;

pub use describe::{describe, describe_with_offset, popup_text, summarize, ActivitySummary, DetailLine};
pub use store::{open_database_store, ActivityStore, LoadOutcome, StoreError};
pub use types::{
    ActivityDetails, ActivityError, ActivityId, ActivityKind, ActivityRecord, Coordinates,
    VariantField,
};
