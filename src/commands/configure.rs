use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::error::ConsoleResult;

pub async fn handle_config(matches: &ArgMatches, context: &mut CliContext) -> ConsoleResult<()> {
    let mut changed = false;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        context.set_base_url(base_url)?;
        println!("Backend origin saved: {}", context.base_url());
        changed = true;
    }

    if let Some(username) = matches.get_one::<String>("username") {
        context.set_username(username)?;
        println!("Default username saved: {}", username);
        changed = true;
    }

    if matches.get_flag("show") || !changed {
        println!("Backend origin: {}", context.base_url());
        match context.default_username() {
            Some(username) => println!("Default username: {}", username),
            None => println!("No default username configured"),
        }
    }

    Ok(())
}
