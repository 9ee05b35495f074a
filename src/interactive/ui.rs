use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{InteractiveApp, Screen};
use super::layout::app_layout;
use super::panels::{header, login, members};
use super::popups;

pub fn draw(frame: &mut Frame, app: &InteractiveApp) {
    let layout = app_layout(frame.size());

    header::draw_header(frame, layout.header, app);

    if app.state().is_authenticated() {
        members::draw(frame, layout.main, app);
    } else {
        login::draw(frame, layout.main, app);
    }

    draw_footer(frame, layout.footer, app);

    popups::draw_popup(frame, frame.size(), app);
}

fn footer_hints(screen: Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Login => &[("Tab", "switch field"), ("Enter", "sign in"), ("Esc", "quit")],
        Screen::Members => &[
            ("j/k", "move"),
            ("Enter", "edit"),
            ("n", "new"),
            ("d", "delete"),
            ("r", "reload"),
            ("L", "log out"),
            ("q", "quit"),
        ],
        Screen::CreateForm => &[("Tab", "next field"), ("Space", "toggle admin"), ("Enter", "save"), ("Esc", "close")],
        Screen::EditForm => &[
            ("Tab", "next field"),
            ("Space", "toggle admin"),
            ("Enter", "save"),
            ("Ctrl+D", "delete"),
            ("Esc", "close"),
        ],
        Screen::ConfirmDelete => &[("y", "delete"), ("n", "keep")],
        Screen::Alert => &[("Enter", "dismiss")],
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let mut spans = Vec::new();
    for (key, label) in footer_hints(app.screen()) {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!("{} ", label), Style::default().fg(Color::DarkGray)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(20, 22, 30)));
    frame.render_widget(footer, area);
}
