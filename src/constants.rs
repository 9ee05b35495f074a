pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const CONFIG_FILE: &str = ".member-console.json";

pub const BASE_URL_ENV: &str = "MEMBER_CONSOLE_URL";
pub const PASSWORD_ENV: &str = "MEMBER_CONSOLE_PASSWORD";

// Backend endpoints, relative to the configured origin
pub const CSRF_PATH: &str = "/csrf/";
pub const SESSION_PATH: &str = "/session/";
pub const LOGIN_PATH: &str = "/login/";
pub const LOGOUT_PATH: &str = "/logout/";
pub const MEMBERS_PATH: &str = "/api/users/";

/// Header carrying the anti-forgery token, both on `/csrf/` responses and on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

pub const LOGIN_FAILED_MESSAGE: &str = "Wrong username or password.";
pub const DELETE_DENIED_MESSAGE: &str = "You do not have permission to delete this user";
pub const TRANSPORT_FAILED_MESSAGE: &str = "Could not reach the server. Please try again.";
