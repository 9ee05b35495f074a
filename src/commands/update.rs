use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::console::{FormKind, StateCommand};
use crate::error::{ApiFailure, ConsoleError, ConsoleResult, ErrorContext};
use crate::formatting::{print_field_errors, print_member};
use super::auth::sign_in;
use super::{find_member_url, member_fields};

pub async fn handle_edit(matches: &ArgMatches, context: &CliContext) -> ConsoleResult<()> {
    let mut console = sign_in(matches, context).await?;

    let email = matches
        .get_one::<String>("email-key")
        .ok_or_else(|| ConsoleError::InvalidInput("Member email is required".to_string()))?;
    let url = find_member_url(console.state(), email)?;

    let fields = member_fields(matches);
    let admin = matches.get_one::<bool>("admin").copied();
    if fields.is_empty() && admin.is_none() {
        return Err(ConsoleError::InvalidInput(
            "No fields to update. Provide at least one field to update.".to_string(),
        ));
    }

    console.dispatch(StateCommand::SelectMember(url.clone()));
    for (field, value) in fields {
        console.dispatch(StateCommand::SetMemberField(FormKind::Edit, field, value));
    }
    if let Some(admin) = admin {
        console.dispatch(StateCommand::SetAdmin(FormKind::Edit, admin));
    }

    let state = console.run(StateCommand::SubmitEdit).await;
    let board = state.board().context("Session ended while saving the member")?;

    if let Some(alert) = &state.alert {
        return Err(ConsoleError::Api(ApiFailure::Detail(alert.clone())));
    }
    if let Some(edit) = &board.edit {
        print_field_errors(&edit.form.errors);
        let reason = edit
            .message
            .clone()
            .unwrap_or_else(|| "Member was not updated".to_string());
        return Err(ConsoleError::InvalidInput(reason));
    }

    let member = board.find(&url).context("Updated member is no longer listed")?;
    println!("{} {}", "✅".green(), "Member updated successfully!".green().bold());
    print_member(member);

    Ok(())
}
