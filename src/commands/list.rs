use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::error::ConsoleResult;
use crate::formatting::print_members;
use super::auth::sign_in;

pub async fn handle_list(matches: &ArgMatches, context: &CliContext) -> ConsoleResult<()> {
    let console = sign_in(matches, context).await?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");

    print_members(console.state().members(), format)
}
