pub mod auth;
pub mod configure;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use clap::ArgMatches;

use crate::console::ConsoleState;
use crate::error::{ConsoleError, ConsoleResult};
use crate::models::MemberField;

pub use auth::{handle_session, sign_in};
pub use configure::handle_config;
pub use create::handle_add;
pub use delete::handle_delete;
pub use list::handle_list;
pub use update::handle_edit;

/// Argument ids of the member fields, shared by `add` and `edit`.
pub fn field_arg(field: MemberField) -> &'static str {
    match field {
        MemberField::FirstName => "first-name",
        MemberField::LastName => "last-name",
        MemberField::Email => "email",
        MemberField::PhoneNumber => "phone",
    }
}

/// Member fields given on the command line, in form order.
pub fn member_fields(matches: &ArgMatches) -> Vec<(MemberField, String)> {
    MemberField::ALL
        .iter()
        .filter_map(|field| {
            matches
                .get_one::<String>(field_arg(*field))
                .map(|value| (*field, value.clone()))
        })
        .collect()
}

/// Members are addressed by email on the command line; the console works with urls.
pub fn find_member_url(state: &ConsoleState, email: &str) -> ConsoleResult<String> {
    state
        .members()
        .iter()
        .find(|m| m.email.eq_ignore_ascii_case(email))
        .map(|m| m.url.clone())
        .ok_or_else(|| ConsoleError::InvalidInput(format!("No member with email '{}'", email)))
}
