//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply an event from a background task to the app state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Loaded { generation, result } => {
            app.finish_load(generation, result);
        }
        AppEvent::TaskPanicked { task, error } => {
            app.loading = false;
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
    app.needs_redraw = true;
}
