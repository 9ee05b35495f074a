use std::io::{self, BufRead, Write};

use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::console::StateCommand;
use crate::error::{ApiFailure, ConsoleError, ConsoleResult, ErrorContext};
use super::auth::sign_in;
use super::find_member_url;

pub async fn handle_delete(matches: &ArgMatches, context: &CliContext) -> ConsoleResult<()> {
    let mut console = sign_in(matches, context).await?;

    let email = matches
        .get_one::<String>("email-key")
        .ok_or_else(|| ConsoleError::InvalidInput("Member email is required".to_string()))?;
    let url = find_member_url(console.state(), email)?;

    console.dispatch(StateCommand::RequestDelete(url.clone()));
    let prompt = console
        .state()
        .board()
        .and_then(|b| b.confirm_delete.as_ref())
        .map(|target| target.prompt())
        .context("Member disappeared before confirmation")?;

    if !matches.get_flag("yes") && !confirm(&prompt)? {
        console.dispatch(StateCommand::CancelDelete);
        println!("Cancelled.");
        return Ok(());
    }

    let state = console.run(StateCommand::ConfirmDelete).await;
    if let Some(alert) = &state.alert {
        return Err(ConsoleError::Api(ApiFailure::Detail(alert.clone())));
    }
    if state.members().iter().any(|m| m.url == url) {
        return Err(ConsoleError::Api(ApiFailure::Transport(
            "Member was not deleted; see the log file for details".to_string(),
        )));
    }

    println!("✅ Member deleted successfully!");
    println!("Email: {}", email);

    Ok(())
}

fn confirm(prompt: &str) -> ConsoleResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
