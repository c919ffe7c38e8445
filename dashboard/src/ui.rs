pub(crate) mod gauge;
pub(crate) mod login;
pub(crate) mod modal;
pub(crate) mod table;

use crate::app::{App, View};
use ratatui::Frame;

/// Draw the whole view for the current frame. Modals sit on top of
/// whichever view is active; the alert wins over the confirm dialog.
pub fn render(frame: &mut Frame, app: &App) {
    match app.view {
        View::Login => login::render(frame, app),
        View::Dashboard => table::render(frame, app),
    }

    if let Some(id) = &app.confirm_delete {
        modal::render_confirm(frame, id);
    }
    if let Some(message) = &app.alert {
        modal::render_alert(frame, message);
    }
}
