use crate::constants::{DELETE_DENIED_MESSAGE, LOGIN_FAILED_MESSAGE, TRANSPORT_FAILED_MESSAGE};
use crate::error::ApiFailure;
use crate::models::{Credentials, Member, MemberDraft, MemberField, SessionStatus};
use crate::validation::{validate_credentials, validate_member, DETAIL};

use super::state::{
    ConsoleState, DeleteTarget, EditForm, FormKind, LoginField, LoginForm, MemberBoard, MemberForm,
    PendingRequest, SessionView,
};

/// Everything that can move the console: user intents and request completions.
#[derive(Debug, Clone, PartialEq)]
pub enum StateCommand {
    // Session
    Mount,
    SessionResolved(Result<SessionStatus, ApiFailure>),
    CsrfRefreshed(Result<String, ApiFailure>),

    // Login form
    SetLoginField(LoginField, String),
    SubmitLogin,
    LoginCompleted(Result<(), ApiFailure>),
    Logout,
    LogoutCompleted(Result<(), ApiFailure>),

    // Member list
    ReloadMembers,
    MembersLoaded(Result<Vec<Member>, ApiFailure>),

    // Member forms
    OpenCreate,
    CloseCreate,
    SelectMember(String),
    CloseEdit,
    SetMemberField(FormKind, MemberField, String),
    SetAdmin(FormKind, bool),
    SubmitCreate,
    MemberCreated(Result<Member, ApiFailure>),
    SubmitEdit,
    MemberUpdated(Result<Member, ApiFailure>),

    // Delete
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    MemberDeleted { url: String, result: Result<(), ApiFailure> },

    DismissAlert,
}

/// Requests the runner performs after a transition. Mutating requests carry
/// the token that was current when they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    FetchSession,
    FetchCsrf,
    Login { credentials: Credentials, csrf: Option<String> },
    Logout,
    LoadMembers,
    CreateMember { draft: MemberDraft, csrf: Option<String> },
    UpdateMember { url: String, draft: MemberDraft, csrf: Option<String> },
    DeleteMember { url: String, csrf: Option<String> },
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConsoleState,
    pub side_effects: Vec<SideEffect>,
}

/// Holds the current state and advances it one command at a time.
pub struct StateMachine {
    state: ConsoleState,
}

impl StateMachine {
    pub fn new(initial_state: ConsoleState) -> Self {
        Self { state: initial_state }
    }

    pub fn current_state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn process_command(&mut self, command: StateCommand) -> TransitionResult {
        let current = std::mem::take(&mut self.state);
        let (new_state, side_effects) = apply_transition(current, command);
        self.state = new_state.clone();
        TransitionResult {
            new_state,
            side_effects,
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(ConsoleState::new())
    }
}

/// Apply a state transition based on the command
pub fn apply_transition(mut state: ConsoleState, command: StateCommand) -> (ConsoleState, Vec<SideEffect>) {
    let mut side_effects = Vec::new();

    match command {
        StateCommand::Mount => {
            if !state.bootstrapped {
                state.bootstrapped = true;
                side_effects.push(SideEffect::FetchSession);
            }
        }

        StateCommand::SessionResolved(Ok(status)) => {
            if status.is_authenticated {
                state.view = SessionView::Authenticated(MemberBoard::default());
                side_effects.push(SideEffect::LoadMembers);
            } else {
                // Keep whatever was already typed into the login form.
                if state.is_authenticated() {
                    state.view = SessionView::Anonymous(LoginForm::default());
                }
                side_effects.push(SideEffect::FetchCsrf);
            }
        }

        // Stays anonymous without a token; the backend will reject the login.
        StateCommand::SessionResolved(Err(_)) => {}

        StateCommand::CsrfRefreshed(Ok(token)) => {
            state.csrf_token = Some(token);
        }

        StateCommand::CsrfRefreshed(Err(_)) => {}

        StateCommand::SetLoginField(field, value) => {
            if let Some(form) = state.login_form_mut() {
                match field {
                    LoginField::Username => form.username = value,
                    LoginField::Password => form.password = value,
                }
            }
        }

        StateCommand::SubmitLogin => {
            if state.pending.is_none() {
                let csrf = state.csrf_token.clone();
                let mut submitted = None;
                if let Some(form) = state.login_form_mut() {
                    let credentials = Credentials::new(form.username.clone(), form.password.clone());
                    form.errors = validate_credentials(&credentials);
                    if form.errors.is_empty() {
                        form.message = None;
                        submitted = Some(credentials);
                    }
                }
                if let Some(credentials) = submitted {
                    state.pending = Some(PendingRequest::Login);
                    side_effects.push(SideEffect::Login { credentials, csrf });
                }
            }
        }

        StateCommand::LoginCompleted(result) => {
            clear_pending(&mut state, PendingRequest::Login);
            match result {
                Ok(()) => {
                    state.view = SessionView::Authenticated(MemberBoard::default());
                    side_effects.push(SideEffect::LoadMembers);
                }
                Err(_) => {
                    if let Some(form) = state.login_form_mut() {
                        form.message = Some(LOGIN_FAILED_MESSAGE.to_string());
                    }
                }
            }
        }

        StateCommand::Logout => {
            if state.pending.is_none() && state.is_authenticated() {
                state.pending = Some(PendingRequest::Logout);
                side_effects.push(SideEffect::Logout);
            }
        }

        StateCommand::LogoutCompleted(result) => {
            clear_pending(&mut state, PendingRequest::Logout);
            if result.is_ok() {
                state.view = SessionView::Anonymous(LoginForm::default());
                side_effects.push(SideEffect::FetchCsrf);
            }
        }

        StateCommand::ReloadMembers => {
            if state.is_authenticated() {
                side_effects.push(SideEffect::LoadMembers);
            }
        }

        StateCommand::MembersLoaded(result) => {
            // A failed load leaves the list as it was; the runner has logged it.
            if let Ok(members) = result {
                if let Some(board) = state.board_mut() {
                    board.members = members;
                }
                side_effects.push(SideEffect::FetchCsrf);
            }
        }

        StateCommand::OpenCreate => {
            if let Some(board) = state.board_mut() {
                board.create_open = true;
            }
        }

        StateCommand::CloseCreate => {
            if let Some(board) = state.board_mut() {
                board.create_open = false;
                board.create.errors.clear();
            }
        }

        StateCommand::SelectMember(url) => {
            if let Some(board) = state.board_mut() {
                if let Some(member) = board.find(&url).cloned() {
                    board.edit = Some(EditForm {
                        url: member.url.clone(),
                        form: MemberForm {
                            draft: MemberDraft::from(&member),
                            errors: Default::default(),
                        },
                        message: None,
                    });
                }
            }
        }

        StateCommand::CloseEdit => {
            if let Some(board) = state.board_mut() {
                board.edit = None;
                board.confirm_delete = None;
            }
        }

        StateCommand::SetMemberField(kind, field, value) => {
            if let Some(form) = state.board_mut().and_then(|b| b.form_mut(kind)) {
                form.draft.set_field(field, value);
            }
        }

        StateCommand::SetAdmin(kind, admin) => {
            if let Some(form) = state.board_mut().and_then(|b| b.form_mut(kind)) {
                form.draft.can_delete_user = admin;
            }
        }

        StateCommand::SubmitCreate => {
            if state.pending.is_none() {
                let csrf = state.csrf_token.clone();
                let mut submitted = None;
                if let Some(board) = state.board_mut().filter(|b| b.create_open) {
                    if let Some(draft) = validated_draft(&mut board.create) {
                        submitted = Some(draft);
                    }
                }
                if let Some(draft) = submitted {
                    state.pending = Some(PendingRequest::Create);
                    side_effects.push(SideEffect::CreateMember { draft, csrf });
                }
            }
        }

        StateCommand::MemberCreated(result) => {
            clear_pending(&mut state, PendingRequest::Create);
            match result {
                Ok(member) => {
                    if let Some(board) = state.board_mut() {
                        board.members.push(member);
                        board.create = MemberForm::default();
                        board.create_open = false;
                    }
                }
                Err(ApiFailure::Validation(errors)) => {
                    if let Some(board) = state.board_mut() {
                        board.create.errors.merge(errors);
                    }
                }
                Err(ApiFailure::Detail(message)) => {
                    if let Some(board) = state.board_mut() {
                        board.create.errors.insert(DETAIL, message);
                    }
                }
                Err(ApiFailure::Transport(_)) => state.alert = Some(TRANSPORT_FAILED_MESSAGE.to_string()),
            }
        }

        StateCommand::SubmitEdit => {
            if state.pending.is_none() {
                let csrf = state.csrf_token.clone();
                let mut submitted = None;
                if let Some(edit) = state.board_mut().and_then(|b| b.edit.as_mut()) {
                    if let Some(draft) = validated_draft(&mut edit.form) {
                        edit.message = None;
                        submitted = Some((edit.url.clone(), draft));
                    }
                }
                if let Some((url, draft)) = submitted {
                    state.pending = Some(PendingRequest::Update);
                    side_effects.push(SideEffect::UpdateMember { url, draft, csrf });
                }
            }
        }

        StateCommand::MemberUpdated(result) => {
            clear_pending(&mut state, PendingRequest::Update);
            match result {
                Ok(updated) => {
                    if let Some(board) = state.board_mut() {
                        for member in board.members.iter_mut() {
                            if member.url == updated.url {
                                *member = updated.clone();
                            }
                        }
                        board.edit = None;
                    }
                }
                Err(ApiFailure::Validation(errors)) => {
                    if let Some(edit) = state.board_mut().and_then(|b| b.edit.as_mut()) {
                        edit.form.errors.merge(errors);
                    }
                }
                Err(ApiFailure::Detail(message)) => {
                    if let Some(edit) = state.board_mut().and_then(|b| b.edit.as_mut()) {
                        edit.message = Some(message);
                    }
                }
                Err(ApiFailure::Transport(_)) => state.alert = Some(TRANSPORT_FAILED_MESSAGE.to_string()),
            }
        }

        StateCommand::RequestDelete(url) => {
            if let Some(board) = state.board_mut() {
                if let Some(member) = board.find(&url).cloned() {
                    board.confirm_delete = Some(DeleteTarget {
                        url: member.url,
                        email: member.email,
                    });
                }
            }
        }

        StateCommand::CancelDelete => {
            if let Some(board) = state.board_mut() {
                board.confirm_delete = None;
            }
        }

        StateCommand::ConfirmDelete => {
            if state.pending.is_none() {
                let csrf = state.csrf_token.clone();
                if let Some(target) = state.board_mut().and_then(|b| b.confirm_delete.take()) {
                    state.pending = Some(PendingRequest::Delete);
                    side_effects.push(SideEffect::DeleteMember { url: target.url, csrf });
                }
            }
        }

        StateCommand::MemberDeleted { url, result } => {
            clear_pending(&mut state, PendingRequest::Delete);
            match result {
                Ok(()) => {
                    if let Some(board) = state.board_mut() {
                        board.members.retain(|m| m.url != url);
                        board.edit = None;
                    }
                }
                // Transport failures are only logged.
                Err(ApiFailure::Transport(_)) => {}
                Err(_) => state.alert = Some(DELETE_DENIED_MESSAGE.to_string()),
            }
        }

        StateCommand::DismissAlert => {
            state.alert = None;
        }
    }

    (state, side_effects)
}

fn clear_pending(state: &mut ConsoleState, request: PendingRequest) {
    if state.pending == Some(request) {
        state.pending = None;
    }
}

/// Run the member rules over a form. On failure the errors replace the
/// form's map and nothing is returned.
fn validated_draft(form: &mut MemberForm) -> Option<MemberDraft> {
    let errors = validate_member(&form.draft);
    if errors.is_empty() {
        form.errors.clear();
        Some(form.draft.clone())
    } else {
        form.errors = errors;
        None
    }
}
