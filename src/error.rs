use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Request failed: {0}")]
    Api(#[from] ApiFailure),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Outcome of a failed backend call, classified by the shape of the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// Non-2xx response carrying a field-keyed error object.
    #[error("validation failed: {}", .0.summary())]
    Validation(FieldErrors),

    /// Non-2xx response carrying a single message.
    #[error("{0}")]
    Detail(String),

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        ApiFailure::Transport(err.to_string())
    }
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> ConsoleResult<T>;
    fn with_context<F>(self, f: F) -> ConsoleResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> ConsoleResult<T> {
        self.map_err(|e| ConsoleError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ConsoleResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ConsoleError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> ConsoleResult<T> {
        self.ok_or_else(|| ConsoleError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> ConsoleResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| ConsoleError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! console_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::ConsoleError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::ConsoleError::$error_type(format!($fmt, $($arg)*))
    };
}
