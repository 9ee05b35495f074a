use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::interactive::app::InteractiveApp;

pub fn draw_header(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let width = area.width as usize;
    let state = app.state();

    let left = vec![Span::styled(
        " Member Console",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    // Right: status indicators
    let mut right_parts = Vec::new();

    if app.is_busy() {
        right_parts.push(Span::styled("working... ", Style::default().fg(Color::Yellow)));
    }

    if state.is_authenticated() {
        right_parts.push(Span::styled(
            format!("{} members ", state.members().len()),
            Style::default().fg(Color::DarkGray),
        ));
        right_parts.push(Span::styled("signed in", Style::default().fg(Color::Green)));
    } else {
        right_parts.push(Span::styled("signed out", Style::default().fg(Color::DarkGray)));
    }

    right_parts.push(Span::raw(" "));

    let right_text_len: usize = right_parts.iter().map(|s| s.content.chars().count()).sum();
    let left_text_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let pad = width.saturating_sub(left_text_len + right_text_len);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(pad)));
    spans.extend(right_parts);

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(20, 22, 30)));
    frame.render_widget(header, area);
}
