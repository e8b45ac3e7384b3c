//! Interfaces of the outer surfaces the session drives.

use crate::activity::describe::ActivitySummary;
use crate::activity::types::{ActivityRecord, Coordinates};

/// Interactive map.
pub trait MapView {
    /// Display the map centered on `center`.
    fn show_map(&mut self, center: Coordinates, zoom: u8);

    /// Place a marker with an open popup.
    fn add_marker(&mut self, coordinates: Coordinates, popup_text: &str);

    /// Pan to `coordinates`.
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8);

    /// Remove every marker.
    fn clear_markers(&mut self);
}

/// One row handed to the list view.
///
/// The row label is `summary.title`.
#[derive(Debug, Clone)]
pub struct ActivityListEntry<'a> {
    pub record: &'a ActivityRecord,
    pub summary: ActivitySummary,
}

/// Activity list display.
pub trait ActivityListView {
    /// Replace the displayed list with `entries`, in store order.
    fn render(&mut self, entries: &[ActivityListEntry<'_>]);
}

/// Form visibility and user-facing messages.
pub trait UserSurface {
    /// Show the activity form for a picked location.
    fn show_form(&mut self);

    /// Hide the form and clear its fields.
    fn hide_form(&mut self);

    /// Tell the user something went wrong.
    fn report(&mut self, message: &str);
}

/// The surfaces a session talks to.
pub struct Collaborators {
    pub map: Box<dyn MapView>,
    pub list: Box<dyn ActivityListView>,
    pub surface: Box<dyn UserSurface>,
}
