//! Session controller wiring user events to the activity store.
//!
//! Events are handled one at a time, each to completion. The controller
//! exclusively owns its store; collaborators only receive values to display.

use chrono::{FixedOffset, Offset, Utc};

use super::collaborators::{ActivityListEntry, Collaborators};
use super::input::RawActivityInput;
use crate::activity::describe::{popup_text, summarize};
use crate::activity::store::{ActivityStore, StoreError};
use crate::activity::types::{ActivityError, ActivityId, Coordinates};
use crate::storage::config::{AppConfig, DEFAULT_ZOOM_LEVEL};
use crate::storage::slot::KeyValueSlot;

/// Message shown when geolocation fails.
pub const POSITION_UNAVAILABLE_MESSAGE: &str = "Could not get your position.";

/// Message shown when persisted activities were lost at startup.
pub const RESTORE_FAILED_MESSAGE: &str = "Saved activities could not be restored.";

/// Message shown when an activity could not be saved.
pub const SAVE_FAILED_MESSAGE: &str = "Could not save the activity.";

/// Message shown when a submission arrives before a location was picked.
pub const NO_LOCATION_MESSAGE: &str = "Pick a location on the map first.";

/// Message shown when resetting failed.
pub const RESET_FAILED_MESSAGE: &str = "Could not reset activities.";

/// Session-level display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Zoom used when showing the map and centering on an activity
    pub zoom_level: u8,
    /// Offset used for activity dates in labels
    pub utc_offset: FixedOffset,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            utc_offset: Utc.fix(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            zoom_level: config.map.zoom_level,
            utc_offset: config.display.utc_offset(),
        }
    }
}

/// Events delivered by the outer surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Geolocation resolved
    LocationAvailable(Coordinates),
    /// Geolocation failed or was denied
    LocationUnavailable,
    /// The user clicked the map
    LocationPicked(Coordinates),
    /// The user submitted the activity form
    NewActivityRequested(RawActivityInput),
    /// The user clicked a list entry; carries the entry's id
    ActivitySelected(String),
    /// The user asked to erase everything
    ResetRequested,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    /// A new activity was stored
    ActivityAdded(ActivityId),
    /// The event was refused; the user was told why
    Rejected(String),
    /// Nothing to do
    Ignored,
}

/// Drives one user session.
pub struct SessionController<S: KeyValueSlot> {
    store: ActivityStore<S>,
    collaborators: Collaborators,
    settings: SessionSettings,
    map_ready: bool,
    pending_location: Option<Coordinates>,
}

impl<S: KeyValueSlot> SessionController<S> {
    /// Start a session on an already opened store.
    ///
    /// Restored activities are rendered into the list right away; markers
    /// follow once the map is shown.
    pub fn new(store: ActivityStore<S>, collaborators: Collaborators, settings: SessionSettings) -> Self {
        let mut controller = Self {
            store,
            collaborators,
            settings,
            map_ready: false,
            pending_location: None,
        };

        if controller.store.load_outcome().is_degraded() {
            controller.collaborators.surface.report(RESTORE_FAILED_MESSAGE);
        }
        controller.render_list();

        controller
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: SessionEvent) -> EventOutcome {
        match event {
            SessionEvent::LocationAvailable(center) => self.on_location_available(center),
            SessionEvent::LocationUnavailable => self.on_location_unavailable(),
            SessionEvent::LocationPicked(coordinates) => self.on_location_picked(coordinates),
            SessionEvent::NewActivityRequested(raw) => self.on_new_activity(&raw),
            SessionEvent::ActivitySelected(id) => self.on_activity_selected(ActivityId::from(id)),
            SessionEvent::ResetRequested => self.on_reset(),
        }
    }

    pub fn store(&self) -> &ActivityStore<S> {
        &self.store
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Location picked on the map and waiting for a form submission.
    pub fn pending_location(&self) -> Option<Coordinates> {
        self.pending_location
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    /// End the session and hand back the store.
    pub fn into_store(self) -> ActivityStore<S> {
        self.store
    }

    fn on_location_available(&mut self, center: Coordinates) -> EventOutcome {
        let offset = self.settings.utc_offset;
        let map = &mut self.collaborators.map;

        if self.map_ready {
            map.clear_markers();
        }
        map.show_map(center, self.settings.zoom_level);
        self.map_ready = true;

        for record in self.store.list() {
            map.add_marker(record.coordinates(), &popup_text(record, offset));
        }

        tracing::info!(markers = self.store.len(), "Map ready");
        EventOutcome::Handled
    }

    fn on_location_unavailable(&mut self) -> EventOutcome {
        tracing::warn!("Geolocation unavailable");
        self.collaborators
            .surface
            .report(POSITION_UNAVAILABLE_MESSAGE);
        EventOutcome::Handled
    }

    fn on_location_picked(&mut self, coordinates: Coordinates) -> EventOutcome {
        self.pending_location = Some(coordinates);
        self.collaborators.surface.show_form();
        EventOutcome::Handled
    }

    fn on_new_activity(&mut self, raw: &RawActivityInput) -> EventOutcome {
        let coordinates = match self.pending_location {
            Some(coordinates) => coordinates,
            None => return self.reject(NO_LOCATION_MESSAGE.to_string()),
        };

        let record = match raw.parse().and_then(|input| input.into_record(coordinates)) {
            Ok(record) => record,
            Err(ActivityError::InvalidInput(detail)) => {
                tracing::warn!(%detail, "Rejected activity input");
                return self.reject(format!("Invalid input! {}", detail));
            }
        };

        let popup = popup_text(&record, self.settings.utc_offset);
        let id = match self.store.add(record) {
            Ok(added) => added.id().clone(),
            Err(StoreError::DuplicateId(id)) => {
                tracing::error!(%id, "Generated activity id already in store");
                return self.reject(SAVE_FAILED_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store activity");
                return self.reject(SAVE_FAILED_MESSAGE.to_string());
            }
        };

        if self.map_ready {
            self.collaborators.map.add_marker(coordinates, &popup);
        }
        self.render_list();
        self.collaborators.surface.hide_form();
        self.pending_location = None;

        EventOutcome::ActivityAdded(id)
    }

    fn on_activity_selected(&mut self, id: ActivityId) -> EventOutcome {
        // Stale list entries are expected after a reset
        let coordinates = match self.store.find_by_id(&id) {
            Ok(record) => record.coordinates(),
            Err(_) => return EventOutcome::Ignored,
        };

        if !self.map_ready {
            return EventOutcome::Ignored;
        }

        self.collaborators
            .map
            .center_on(coordinates, self.settings.zoom_level);
        EventOutcome::Handled
    }

    fn on_reset(&mut self) -> EventOutcome {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear activities");
            return self.reject(RESET_FAILED_MESSAGE.to_string());
        }

        if self.map_ready {
            self.collaborators.map.clear_markers();
        }
        self.pending_location = None;
        self.render_list();

        EventOutcome::Handled
    }

    fn reject(&mut self, message: String) -> EventOutcome {
        self.collaborators.surface.report(&message);
        EventOutcome::Rejected(message)
    }

    fn render_list(&mut self) {
        let offset = self.settings.utc_offset;
        let entries: Vec<ActivityListEntry<'_>> = self
            .store
            .list()
            .iter()
            .map(|record| ActivityListEntry {
                record,
                summary: summarize(record, offset),
            })
            .collect();

        self.collaborators.list.render(&entries);
    }
}
