//! Trailmark - running and cycling activity log
//!
//! Records running and cycling sessions at map locations, derives pace or
//! speed for each, keeps them in an ordered in-memory store and persists the
//! collection to a durable key/value slot so it survives restarts.

pub mod activity;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use activity::store::{ActivityStore, LoadOutcome};
pub use activity::types::{ActivityId, ActivityKind, ActivityRecord, Coordinates};
pub use session::controller::{SessionController, SessionEvent};
pub use storage::config::AppConfig;
