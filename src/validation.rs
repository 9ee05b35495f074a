use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::models::{Credentials, MemberDraft};

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const EMAIL: &str = "email";
pub const PHONE_NUMBER: &str = "phone_number";
/// Key for a backend message that belongs to no single field.
pub const DETAIL: &str = "detail";

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid");
}

/// Field name to human-readable message, one map per form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Server errors land in the same slots as local ones; later entries win.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// One line, `field: message; field: message`.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Build from a field-keyed JSON object. Values may be strings or
    /// lists of strings; lists are joined with a space.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut errors = FieldErrors::new();
        for (field, value) in object {
            let message = match value {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            };
            errors.insert(field.clone(), message);
        }
        errors
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn validate_credentials(credentials: &Credentials) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&credentials.username) {
        errors.insert(USERNAME, "Username is required.");
    }
    if is_blank(&credentials.password) {
        errors.insert(PASSWORD, "Password is required.");
    }
    errors
}

/// Same rules for the new-member and edited-member forms.
pub fn validate_member(draft: &MemberDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.first_name) {
        errors.insert(FIRST_NAME, "First name is required.");
    }
    if is_blank(&draft.last_name) {
        errors.insert(LAST_NAME, "Last name is required.");
    }
    if is_blank(&draft.email) {
        errors.insert(EMAIL, "Email is required.");
    } else if !is_valid_email(&draft.email) {
        errors.insert(EMAIL, "Email address is invalid.");
    }
    if is_blank(&draft.phone_number) {
        errors.insert(PHONE_NUMBER, "Phone number is required.");
    }
    errors
}
