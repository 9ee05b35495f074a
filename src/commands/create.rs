use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::console::{FormKind, StateCommand};
use crate::error::{ApiFailure, ConsoleError, ConsoleResult, ErrorContext};
use crate::formatting::{print_field_errors, print_member};
use super::auth::sign_in;
use super::member_fields;

pub async fn handle_add(matches: &ArgMatches, context: &CliContext) -> ConsoleResult<()> {
    let mut console = sign_in(matches, context).await?;

    console.dispatch(StateCommand::OpenCreate);
    for (field, value) in member_fields(matches) {
        console.dispatch(StateCommand::SetMemberField(FormKind::Create, field, value));
    }
    console.dispatch(StateCommand::SetAdmin(FormKind::Create, matches.get_flag("admin")));

    let state = console.run(StateCommand::SubmitCreate).await;
    let board = state.board().context("Session ended while adding the member")?;

    if let Some(alert) = &state.alert {
        return Err(ConsoleError::Api(ApiFailure::Detail(alert.clone())));
    }
    if board.create_open {
        print_field_errors(&board.create.errors);
        return Err(ConsoleError::InvalidInput("Member was not added".to_string()));
    }

    let member = board.members.last().context("Backend returned no member")?;
    println!("{} {}", "✅".green(), "Member added successfully!".green().bold());
    print_member(member);

    Ok(())
}
