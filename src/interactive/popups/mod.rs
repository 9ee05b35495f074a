pub mod alert;
pub mod confirm;
pub mod member_form;

use ratatui::{Frame, layout::Rect};
use crate::interactive::app::{InteractiveApp, Screen};

/// Draw the active popups, if any. Draws on top of everything.
pub fn draw_popup(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(board) = app.state().board() else {
        // Alerts can outlive the session, e.g. a failed request after logout.
        if app.screen() == Screen::Alert {
            alert::draw(frame, area, app);
        }
        return;
    };

    // Stack from the bottom: form, then the delete prompt, then any alert.
    if board.edit.is_some() {
        member_form::draw_edit(frame, area, app);
    } else if board.create_open {
        member_form::draw_create(frame, area, app);
    }

    if board.confirm_delete.is_some() {
        confirm::draw(frame, area, app);
    }

    if app.state().alert.is_some() {
        alert::draw(frame, area, app);
    }
}
