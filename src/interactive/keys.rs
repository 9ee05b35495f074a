use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::interactive::app::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    NextField,
    PrevField,

    // Text input
    TypeChar(char),
    Backspace,

    // Forms and list
    Submit,
    Cancel,
    NewMember,
    Reload,
    Logout,
    RequestDelete,

    // Popups
    Confirm,
    Deny,
    DismissAlert,

    Quit,
    None,
}

pub fn map_key(key: KeyEvent, screen: Screen) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('d') if screen == Screen::EditForm => Action::RequestDelete,
            _ => Action::None,
        };
    }

    match screen {
        Screen::Alert => map_alert_key(key),
        Screen::ConfirmDelete => map_confirm_key(key),
        Screen::Login => map_login_key(key),
        Screen::Members => map_list_key(key),
        Screen::CreateForm | Screen::EditForm => map_form_key(key),
    }
}

fn map_alert_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Action::DismissAlert,
        _ => Action::None,
    }
}

fn map_confirm_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Deny,
        _ => Action::None,
    }
}

fn map_login_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::TypeChar(c),
        _ => Action::None,
    }
}

fn map_list_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char('n') | KeyCode::Char('a') => Action::NewMember,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('d') => Action::RequestDelete,
        KeyCode::Char('L') => Action::Logout,
        _ => Action::None,
    }
}

fn map_form_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::TypeChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_type_into_forms_but_command_the_list() {
        assert_eq!(map_key(press(KeyCode::Char('n')), Screen::Members), Action::NewMember);
        assert_eq!(map_key(press(KeyCode::Char('n')), Screen::CreateForm), Action::TypeChar('n'));
        assert_eq!(map_key(press(KeyCode::Char('q')), Screen::Login), Action::TypeChar('q'));
    }

    #[test]
    fn test_ctrl_d_only_deletes_from_edit_form() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_d, Screen::EditForm), Action::RequestDelete);
        assert_eq!(map_key(ctrl_d, Screen::CreateForm), Action::None);
    }

    #[test]
    fn test_alert_swallows_everything_but_dismiss() {
        assert_eq!(map_key(press(KeyCode::Char('q')), Screen::Alert), Action::None);
        assert_eq!(map_key(press(KeyCode::Esc), Screen::Alert), Action::DismissAlert);
    }
}
