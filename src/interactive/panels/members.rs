use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::formatting::utils::{or_dash, truncate};
use crate::interactive::app::InteractiveApp;
use crate::models::Member;

fn member_row<'a>(member: &Member, width: usize) -> ListItem<'a> {
    let name_width = (width / 3).max(12);
    let email_width = (width / 3).max(16);

    let mut spans = vec![
        Span::styled(
            format!("{:<w$} ", truncate(&member.full_name(), name_width), w = name_width),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:<w$} ", truncate(&member.email, email_width), w = email_width),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(or_dash(member.phone()).to_string(), Style::default().fg(Color::Gray)),
    ];
    if member.is_admin() {
        spans.push(Span::styled(
            " (admin)",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    ListItem::new(Line::from(spans))
}

pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let members = app.state().members();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Team members ")
        .border_style(Style::default().fg(Color::Cyan));

    if members.is_empty() {
        let text = if app.is_busy() { "Loading..." } else { "No members yet. Press n to add one." };
        let empty = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = members.iter().map(|m| member_row(m, width)).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 44, 60)).add_modifier(Modifier::BOLD))
        .highlight_symbol("\u{25b6} ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(members.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
