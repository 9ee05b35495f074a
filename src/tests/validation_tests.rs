use serde_json::json;

use crate::models::{Credentials, MemberDraft};
use crate::validation::{
    is_valid_email, validate_credentials, validate_member, FieldErrors, EMAIL, FIRST_NAME,
    LAST_NAME, PASSWORD, PHONE_NUMBER, USERNAME,
};

fn complete_draft() -> MemberDraft {
    MemberDraft {
        username: "ann@example.com".to_string(),
        email: "ann@example.com".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        phone_number: "555-0100".to_string(),
        can_delete_user: false,
    }
}

#[test]
fn test_blank_credentials_flag_both_fields() {
    let errors = validate_credentials(&Credentials::new("", "   "));
    assert_eq!(errors.get(USERNAME), Some("Username is required."));
    assert_eq!(errors.get(PASSWORD), Some("Password is required."));
}

#[test]
fn test_filled_credentials_pass() {
    assert!(validate_credentials(&Credentials::new("ann", "secret")).is_empty());
}

#[test]
fn test_complete_draft_passes() {
    assert!(validate_member(&complete_draft()).is_empty());
}

#[test]
fn test_every_blank_member_field_is_reported() {
    let errors = validate_member(&MemberDraft::default());
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(FIRST_NAME), Some("First name is required."));
    assert_eq!(errors.get(LAST_NAME), Some("Last name is required."));
    assert_eq!(errors.get(EMAIL), Some("Email is required."));
    assert_eq!(errors.get(PHONE_NUMBER), Some("Phone number is required."));
}

#[test]
fn test_malformed_email_is_reported_once() {
    let mut draft = complete_draft();
    draft.email = "ann.example.com".to_string();

    let errors = validate_member(&draft);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(EMAIL), Some("Email address is invalid."));
}

#[test]
fn test_email_shape() {
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@"));
}

#[test]
fn test_backend_error_lists_are_joined() {
    let body = json!({
        "email": ["user with this email already exists.", "Enter a valid email address."],
        "phone_number": "Too long."
    });
    let errors = FieldErrors::from_json_object(body.as_object().unwrap());

    assert_eq!(
        errors.get(EMAIL),
        Some("user with this email already exists. Enter a valid email address.")
    );
    assert_eq!(errors.get(PHONE_NUMBER), Some("Too long."));
}

#[test]
fn test_merge_overwrites_matching_fields_only() {
    let mut errors: FieldErrors = [(FIRST_NAME, "old"), (EMAIL, "old")].into_iter().collect();
    let incoming: FieldErrors = [(EMAIL, "new")].into_iter().collect();
    errors.merge(incoming);

    assert_eq!(errors.get(FIRST_NAME), Some("old"));
    assert_eq!(errors.get(EMAIL), Some("new"));
}
