//! Session module.
//!
//! Connects the map, list and form surfaces to the activity store:
//! - Raw form input is parsed and validated before any record is built
//! - New activities are stored, marked on the map and listed
//! - Selecting a listed activity centers the map on it

pub mod collaborators;
pub mod controller;
pub mod input;

pub use collaborators::{ActivityListEntry, ActivityListView, Collaborators, MapView, UserSurface};
pub use controller::{EventOutcome, SessionController, SessionEvent, SessionSettings};
pub use input::{ActivityInput, RawActivityInput};
