use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::interactive::app::InteractiveApp;
use crate::interactive::layout::centered_popup;

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(message) = &app.state().alert else {
        return;
    };

    let popup_area = centered_popup(56, 7, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alert ")
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Enter: OK", Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, popup_area);
}
