use std::env;

use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::console::{Console, LoginField, StateCommand};
use crate::constants::{LOGIN_FAILED_MESSAGE, PASSWORD_ENV};
use crate::error::{ConsoleError, ConsoleResult};
use crate::formatting::print_field_errors;

/// Bootstrap a console and log it in with the command's credentials.
pub async fn sign_in(matches: &ArgMatches, context: &CliContext) -> ConsoleResult<Console> {
    let username = matches
        .get_one::<String>("username")
        .map(String::as_str)
        .or_else(|| context.default_username())
        .unwrap_or_default()
        .to_string();

    let password = match matches.get_one::<String>("password") {
        Some(password) => password.clone(),
        None => env::var(PASSWORD_ENV).unwrap_or_default(),
    };

    let mut console = context.console()?;
    console.run(StateCommand::Mount).await;
    if console.state().is_authenticated() {
        return Ok(console);
    }

    console.dispatch(StateCommand::SetLoginField(LoginField::Username, username));
    console.dispatch(StateCommand::SetLoginField(LoginField::Password, password));
    let state = console.run(StateCommand::SubmitLogin).await;

    if let Some(form) = state.login_form() {
        if !form.errors.is_empty() {
            print_field_errors(&form.errors);
            return Err(ConsoleError::InvalidInput(format!(
                "Pass --username and --password, or set {}",
                PASSWORD_ENV
            )));
        }
        let message = form.message.clone().unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
        return Err(ConsoleError::LoginFailed(message));
    }

    Ok(console)
}

/// `members session`: report what the backend says about a fresh session.
pub async fn handle_session(context: &CliContext) -> ConsoleResult<()> {
    let mut console = context.console()?;
    let state = console.run(StateCommand::Mount).await;

    println!("{}: {}", "Backend".bold(), context.base_url());
    if state.is_authenticated() {
        println!("{} {}", "✓".green(), "Session is authenticated".green());
    } else {
        println!("{} {}", "○".dimmed(), "Session is anonymous");
    }
    if state.csrf_token.is_some() {
        println!("{} {}", "✓".green(), "Anti-forgery token issued");
    } else {
        println!("{} {}", "✗".red(), "No anti-forgery token (see the log for details)".red());
    }

    Ok(())
}
