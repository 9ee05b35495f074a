use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::console::LoginField;
use crate::interactive::app::InteractiveApp;
use crate::interactive::layout::centered_popup;
use crate::validation::{PASSWORD, USERNAME};

/// One labelled input row. The active row shows a block cursor after the value.
pub fn field_line<'a>(label: &str, value: String, active: bool) -> Line<'a> {
    let label_style = if active {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = if active {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let indicator = if active { "\u{25b6} " } else { "  " };

    let mut spans = vec![
        Span::styled(indicator, label_style),
        Span::styled(format!("{:<14}", label), label_style),
        Span::styled(value, value_style),
    ];
    if active {
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }
    Line::from(spans)
}

pub fn error_line<'a>(message: &str) -> Line<'a> {
    Line::from(Span::styled(
        format!("{:16}{}", "", message),
        Style::default().fg(Color::Red),
    ))
}

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(form) = app.state().login_form() else {
        return;
    };

    let box_area = centered_popup(56, 10, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign in ")
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();

    lines.push(field_line(
        "Username",
        form.username.clone(),
        app.login_field == LoginField::Username,
    ));
    if let Some(error) = form.errors.get(USERNAME) {
        lines.push(error_line(error));
    }

    lines.push(field_line(
        "Password",
        "*".repeat(form.password.chars().count()),
        app.login_field == LoginField::Password,
    ));
    if let Some(error) = form.errors.get(PASSWORD) {
        lines.push(error_line(error));
    }

    if let Some(message) = &form.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}
