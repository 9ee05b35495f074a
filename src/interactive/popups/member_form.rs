use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::console::MemberForm;
use crate::interactive::app::{InteractiveApp, FORM_SLOTS};
use crate::interactive::layout::centered_popup;
use crate::interactive::panels::login::{error_line, field_line};
use crate::models::MemberField;
use crate::validation::DETAIL;

pub fn draw_create(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    if let Some(board) = app.state().board() {
        draw_form(frame, area, app, " New member ", &board.create, None);
    }
}

pub fn draw_edit(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    if let Some(edit) = app.state().board().and_then(|b| b.edit.as_ref()) {
        draw_form(frame, area, app, " Edit member ", &edit.form, edit.message.as_deref());
    }
}

fn draw_form(
    frame: &mut Frame,
    area: Rect,
    app: &InteractiveApp,
    title: &str,
    form: &MemberForm,
    message: Option<&str>,
) {
    let mut lines = Vec::new();

    if let Some(message) = message {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for (slot, field) in MemberField::ALL.iter().enumerate() {
        lines.push(field_line(
            field.label(),
            form.draft.field(*field).to_string(),
            app.form_slot == slot,
        ));
        if let Some(error) = form.errors.get(field.key()) {
            lines.push(error_line(error));
        }
    }

    let admin_active = app.form_slot == FORM_SLOTS - 1;
    let checkbox = if form.draft.can_delete_user { "[x]" } else { "[ ]" };
    let admin_style = if admin_active {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    lines.push(Line::from(vec![
        Span::styled(if admin_active { "\u{25b6} " } else { "  " }, admin_style),
        Span::styled(format!("{:<14}", "Admin"), admin_style),
        Span::styled(checkbox, admin_style),
    ]));

    // Backend errors for fields the form has no row for.
    for (key, error) in form.errors.iter() {
        if !MemberField::ALL.iter().any(|f| f.key() == key) {
            let text = if key == DETAIL {
                error.to_string()
            } else {
                format!("{}: {}", key, error)
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(Color::Red),
            )));
        }
    }

    if app.state().is_pending() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow))));
    }

    let height = (lines.len() as u16 + 2).max(9);
    let popup_area = centered_popup(64, height, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
