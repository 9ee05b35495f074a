use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `GET /session/`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
}

/// Body of `POST /login/`.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Debug output ends up in the log file; keep the password out of it.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
