use crate::models::{Member, MemberDraft};
use crate::validation::FieldErrors;

/// Which login input a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Which member form a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

/// User-initiated request currently outstanding. While one is set, further
/// submissions are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Login,
    Logout,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub errors: FieldErrors,
    /// Generic failure message, never the backend's detail.
    pub message: Option<String>,
}

impl LoginForm {
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberForm {
    pub draft: MemberDraft,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    /// Resource locator of the member being edited; the PUT target.
    pub url: String,
    pub form: MemberForm,
    /// Top-level `detail` from a failed save.
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTarget {
    pub url: String,
    pub email: String,
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberBoard {
    /// Server order, with local appends/replacements/removals after confirmed mutations.
    pub members: Vec<Member>,
    /// The create draft outlives the modal; only a successful save resets it.
    pub create: MemberForm,
    pub create_open: bool,
    pub edit: Option<EditForm>,
    pub confirm_delete: Option<DeleteTarget>,
}

impl MemberBoard {
    pub fn find(&self, url: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.url == url)
    }

    pub fn form(&self, kind: FormKind) -> Option<&MemberForm> {
        match kind {
            FormKind::Create => Some(&self.create),
            FormKind::Edit => self.edit.as_ref().map(|e| &e.form),
        }
    }

    pub(crate) fn form_mut(&mut self, kind: FormKind) -> Option<&mut MemberForm> {
        match kind {
            FormKind::Create => Some(&mut self.create),
            FormKind::Edit => self.edit.as_mut().map(|e| &mut e.form),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Anonymous(LoginForm),
    Authenticated(MemberBoard),
}

impl Default for SessionView {
    fn default() -> Self {
        SessionView::Anonymous(LoginForm::default())
    }
}

/// The whole console as one value. Every change goes through
/// [`apply_transition`](super::transition::apply_transition).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    pub view: SessionView,
    /// Most recently issued anti-forgery token.
    pub csrf_token: Option<String>,
    /// Set once the session query has been issued.
    pub bootstrapped: bool,
    pub pending: Option<PendingRequest>,
    /// Blocking alert; the screen shows it until dismissed.
    pub alert: Option<String>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.view, SessionView::Authenticated(_))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn login_form(&self) -> Option<&LoginForm> {
        match &self.view {
            SessionView::Anonymous(form) => Some(form),
            SessionView::Authenticated(_) => None,
        }
    }

    pub fn board(&self) -> Option<&MemberBoard> {
        match &self.view {
            SessionView::Authenticated(board) => Some(board),
            SessionView::Anonymous(_) => None,
        }
    }

    pub fn members(&self) -> &[Member] {
        self.board().map(|b| b.members.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn login_form_mut(&mut self) -> Option<&mut LoginForm> {
        match &mut self.view {
            SessionView::Anonymous(form) => Some(form),
            SessionView::Authenticated(_) => None,
        }
    }

    pub(crate) fn board_mut(&mut self) -> Option<&mut MemberBoard> {
        match &mut self.view {
            SessionView::Authenticated(board) => Some(board),
            SessionView::Anonymous(_) => None,
        }
    }
}
