use crate::console_error;
use crate::error::{ApiFailure, ConsoleError, ErrorContext};
use crate::validation::FieldErrors;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found"
    ));

    match result.context("Failed to read config file") {
        Err(ConsoleError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read config file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected ConsoleError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    match option.context("Member not found") {
        Err(ConsoleError::Unknown(msg)) => assert_eq!(msg, "Member not found"),
        _ => panic!("Expected ConsoleError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied"
    ));

    match result.with_context(|| format!("Failed to write {}", "/tmp/config.json")) {
        Err(ConsoleError::Unknown(msg)) => {
            assert!(msg.contains("Failed to write /tmp/config.json"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected ConsoleError::Unknown"),
    }
}

#[test]
fn test_console_error_macro() {
    let error = console_error!(ConfigError, "Missing origin");
    match error {
        ConsoleError::ConfigError(msg) => assert_eq!(msg, "Missing origin"),
        _ => panic!("Expected ConsoleError::ConfigError"),
    }

    let error = console_error!(InvalidInput, "No member with email '{}'", "a@b.co");
    match error {
        ConsoleError::InvalidInput(msg) => assert_eq!(msg, "No member with email 'a@b.co'"),
        _ => panic!("Expected ConsoleError::InvalidInput"),
    }
}

#[test]
fn test_api_failure_converts_and_displays() {
    let detail: ConsoleError = ApiFailure::Detail("Not found.".to_string()).into();
    assert_eq!(detail.to_string(), "Request failed: Not found.");

    let mut errors = FieldErrors::new();
    errors.insert("email", "user with this email already exists.");
    let validation = ApiFailure::Validation(errors);
    assert!(validation.to_string().contains("user with this email already exists."));
}
