use crossterm::event::KeyEvent;

use crate::console::{Console, ConsoleState, FormKind, LoginField, MemberForm, StateCommand};
use crate::models::MemberField;
use super::keys::{map_key, Action};

/// Number of focusable rows in a member form: the text fields plus the admin checkbox.
pub const FORM_SLOTS: usize = MemberField::ALL.len() + 1;

/// What the screen is showing, derived from the console state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Members,
    CreateForm,
    EditForm,
    ConfirmDelete,
    Alert,
}

impl Screen {
    pub fn of(state: &ConsoleState) -> Screen {
        if state.alert.is_some() {
            return Screen::Alert;
        }
        match state.board() {
            None => Screen::Login,
            Some(board) if board.confirm_delete.is_some() => Screen::ConfirmDelete,
            Some(board) if board.edit.is_some() => Screen::EditForm,
            Some(board) if board.create_open => Screen::CreateForm,
            Some(_) => Screen::Members,
        }
    }
}

/// Screen-local focus on top of the console. Nothing here is sent to the backend.
pub struct InteractiveApp {
    pub console: Console,
    pub login_field: LoginField,
    pub selected_index: usize,
    /// Index into the member form rows; `FORM_SLOTS - 1` is the admin checkbox.
    pub form_slot: usize,
    pub should_quit: bool,
    default_username: Option<String>,
}

impl InteractiveApp {
    pub fn new(console: Console, default_username: Option<String>) -> Self {
        Self {
            console,
            login_field: LoginField::Username,
            selected_index: 0,
            form_slot: 0,
            should_quit: false,
            default_username,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        self.console.state()
    }

    pub fn screen(&self) -> Screen {
        Screen::of(self.state())
    }

    /// Start the session bootstrap; the login form is prefilled with the saved username.
    pub fn mount(&mut self) {
        self.console.dispatch(StateCommand::Mount);
        if let Some(username) = self.default_username.clone() {
            self.console
                .dispatch(StateCommand::SetLoginField(LoginField::Username, username));
            self.login_field = LoginField::Password;
        }
    }

    /// Apply finished requests. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let changed = self.console.poll_completions();
        if changed {
            self.clamp_selection();
        }
        changed
    }

    pub fn is_busy(&self) -> bool {
        self.console.in_flight() > 0
    }

    pub fn form_kind(&self) -> Option<FormKind> {
        match self.screen() {
            Screen::CreateForm => Some(FormKind::Create),
            Screen::EditForm => Some(FormKind::Edit),
            _ => None,
        }
    }

    pub fn active_form(&self) -> Option<&MemberForm> {
        let kind = self.form_kind()?;
        self.state().board()?.form(kind)
    }

    /// The member field under focus, or `None` when the admin checkbox is.
    pub fn focused_field(&self) -> Option<MemberField> {
        MemberField::ALL.get(self.form_slot).copied()
    }

    pub fn selected_url(&self) -> Option<String> {
        self.state()
            .members()
            .get(self.selected_index)
            .map(|m| m.url.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key, self.screen());
        self.handle_action(action);
    }

    pub fn handle_action(&mut self, action: Action) {
        let screen = self.screen();
        match action {
            Action::Quit => self.should_quit = true,
            Action::None => {}

            Action::MoveUp => self.move_selection_up(),
            Action::MoveDown => self.move_selection_down(),
            Action::NextField => self.cycle_field(screen, true),
            Action::PrevField => self.cycle_field(screen, false),

            Action::TypeChar(c) => self.type_char(screen, c),
            Action::Backspace => self.backspace(screen),

            Action::Submit => match screen {
                Screen::Login => self.console.dispatch(StateCommand::SubmitLogin),
                Screen::CreateForm => self.console.dispatch(StateCommand::SubmitCreate),
                Screen::EditForm => self.console.dispatch(StateCommand::SubmitEdit),
                Screen::Members => {
                    if let Some(url) = self.selected_url() {
                        self.form_slot = 0;
                        self.console.dispatch(StateCommand::SelectMember(url));
                    }
                }
                _ => {}
            },
            Action::Cancel => match screen {
                Screen::CreateForm => self.console.dispatch(StateCommand::CloseCreate),
                Screen::EditForm => self.console.dispatch(StateCommand::CloseEdit),
                _ => {}
            },
            Action::NewMember => {
                self.form_slot = 0;
                self.console.dispatch(StateCommand::OpenCreate);
            }
            Action::Reload => self.console.dispatch(StateCommand::ReloadMembers),
            Action::Logout => self.console.dispatch(StateCommand::Logout),
            Action::RequestDelete => {
                let url = match screen {
                    Screen::EditForm => self
                        .state()
                        .board()
                        .and_then(|b| b.edit.as_ref())
                        .map(|e| e.url.clone()),
                    Screen::Members => self.selected_url(),
                    _ => None,
                };
                if let Some(url) = url {
                    self.console.dispatch(StateCommand::RequestDelete(url));
                }
            }

            Action::Confirm => self.console.dispatch(StateCommand::ConfirmDelete),
            Action::Deny => self.console.dispatch(StateCommand::CancelDelete),
            Action::DismissAlert => self.console.dispatch(StateCommand::DismissAlert),
        }
    }

    fn cycle_field(&mut self, screen: Screen, forward: bool) {
        match screen {
            Screen::Login => {
                self.login_field = match self.login_field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            Screen::CreateForm | Screen::EditForm => {
                self.form_slot = if forward {
                    (self.form_slot + 1) % FORM_SLOTS
                } else {
                    (self.form_slot + FORM_SLOTS - 1) % FORM_SLOTS
                };
            }
            _ => {}
        }
    }

    fn type_char(&mut self, screen: Screen, c: char) {
        if screen == Screen::Login {
            if let Some(form) = self.state().login_form() {
                let mut value = form.value(self.login_field).to_string();
                value.push(c);
                self.console
                    .dispatch(StateCommand::SetLoginField(self.login_field, value));
            }
            return;
        }

        let Some(kind) = self.form_kind() else { return };
        let Some(form) = self.active_form() else { return };
        match self.focused_field() {
            Some(field) => {
                let mut draft = form.draft.clone();
                draft.push_char(field, c);
                let value = draft.field(field).to_string();
                self.console
                    .dispatch(StateCommand::SetMemberField(kind, field, value));
            }
            None if c == ' ' => {
                let admin = !form.draft.can_delete_user;
                self.console.dispatch(StateCommand::SetAdmin(kind, admin));
            }
            None => {}
        }
    }

    fn backspace(&mut self, screen: Screen) {
        if screen == Screen::Login {
            if let Some(form) = self.state().login_form() {
                let mut value = form.value(self.login_field).to_string();
                value.pop();
                self.console
                    .dispatch(StateCommand::SetLoginField(self.login_field, value));
            }
            return;
        }

        let (Some(kind), Some(field)) = (self.form_kind(), self.focused_field()) else { return };
        if let Some(form) = self.active_form() {
            let mut value = form.draft.field(field).to_string();
            value.pop();
            self.console
                .dispatch(StateCommand::SetMemberField(kind, field, value));
        }
    }

    fn move_selection_down(&mut self) {
        let len = self.state().members().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    fn move_selection_up(&mut self) {
        let len = self.state().members().len();
        if len > 0 {
            if self.selected_index == 0 {
                self.selected_index = len - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.state().members().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemberClient;
    use crate::console::{DeleteTarget, MemberBoard, SessionView};
    use crate::models::Member;

    fn member(n: u32) -> Member {
        Member {
            url: format!("http://localhost:8000/api/users/{}/", n),
            username: format!("m{}@example.com", n),
            email: format!("m{}@example.com", n),
            first_name: "Member".to_string(),
            last_name: n.to_string(),
            phone_number: None,
            can_delete_user: false,
        }
    }

    fn board_state(board: MemberBoard) -> ConsoleState {
        ConsoleState {
            view: SessionView::Authenticated(board),
            ..ConsoleState::default()
        }
    }

    fn app() -> InteractiveApp {
        let client = MemberClient::new("http://127.0.0.1:9".to_string()).unwrap();
        InteractiveApp::new(Console::new(client), None)
    }

    #[test]
    fn test_screen_follows_state() {
        assert_eq!(Screen::of(&ConsoleState::new()), Screen::Login);

        let mut board = MemberBoard::default();
        assert_eq!(Screen::of(&board_state(board.clone())), Screen::Members);

        board.create_open = true;
        assert_eq!(Screen::of(&board_state(board.clone())), Screen::CreateForm);

        board.confirm_delete = Some(DeleteTarget {
            url: "u".to_string(),
            email: "e".to_string(),
        });
        assert_eq!(Screen::of(&board_state(board.clone())), Screen::ConfirmDelete);

        let mut state = board_state(board);
        state.alert = Some("nope".to_string());
        assert_eq!(Screen::of(&state), Screen::Alert);
    }

    #[tokio::test]
    async fn test_typing_fills_the_focused_login_field() {
        let mut app = app();
        for c in "ann".chars() {
            app.handle_action(Action::TypeChar(c));
        }
        app.handle_action(Action::NextField);
        app.handle_action(Action::TypeChar('x'));
        app.handle_action(Action::TypeChar('y'));
        app.handle_action(Action::Backspace);

        let form = app.state().login_form().unwrap();
        assert_eq!(form.username, "ann");
        assert_eq!(form.password, "x");
    }

    #[tokio::test]
    async fn test_blank_login_submit_starts_no_request() {
        let mut app = app();
        app.handle_action(Action::Submit);
        assert_eq!(app.console.in_flight(), 0);
        assert!(app.state().login_form().unwrap().errors.contains(crate::validation::USERNAME));
    }

    #[tokio::test]
    async fn test_email_typed_in_create_form_mirrors_into_username() {
        let mut app = app();
        let state = board_state(MemberBoard {
            members: vec![member(1), member(2)],
            ..MemberBoard::default()
        });
        app.console.replace_state(state);

        app.handle_action(Action::NewMember);
        app.handle_action(Action::NextField);
        app.handle_action(Action::NextField);
        assert_eq!(app.focused_field(), Some(MemberField::Email));
        for c in "a@b.co".chars() {
            app.handle_action(Action::TypeChar(c));
        }

        let draft = &app.state().board().unwrap().create.draft;
        assert_eq!(draft.email, "a@b.co");
        assert_eq!(draft.username, "a@b.co");
    }

    #[tokio::test]
    async fn test_space_on_admin_slot_toggles_admin() {
        let mut app = app();
        app.console.replace_state(board_state(MemberBoard::default()));
        app.handle_action(Action::NewMember);
        app.handle_action(Action::PrevField);
        assert_eq!(app.focused_field(), None);

        app.handle_action(Action::TypeChar(' '));
        assert!(app.state().board().unwrap().create.draft.can_delete_user);
        app.handle_action(Action::TypeChar(' '));
        assert!(!app.state().board().unwrap().create.draft.can_delete_user);
    }

    #[tokio::test]
    async fn test_selection_wraps_and_enter_opens_edit() {
        let mut app = app();
        app.console.replace_state(board_state(MemberBoard {
            members: vec![member(1), member(2)],
            ..MemberBoard::default()
        }));

        app.handle_action(Action::MoveUp);
        assert_eq!(app.selected_index, 1);
        app.handle_action(Action::Submit);

        let edit = app.state().board().unwrap().edit.as_ref().unwrap();
        assert_eq!(edit.url, member(2).url);
        assert_eq!(app.screen(), Screen::EditForm);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_requests_complete_while_driven_from_a_blocking_loop() {
        let mut app = app();
        tokio::task::block_in_place(|| {
            for c in "ann".chars() {
                app.handle_action(Action::TypeChar(c));
            }
            app.handle_action(Action::NextField);
            app.handle_action(Action::TypeChar('x'));
            app.handle_action(Action::Submit);
            assert_eq!(app.console.in_flight(), 1);

            // Nothing listens on port 9, so the login fails quickly.
            for _ in 0..500 {
                app.poll();
                if !app.is_busy() {
                    break;
                }
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        });

        assert!(!app.is_busy());
        assert_eq!(app.state().pending, None);
        assert!(app.state().login_form().unwrap().message.is_some());
    }
}
