use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use member_console::cli_context::CliContext;
use member_console::commands::{
    handle_add, handle_config, handle_delete, handle_edit, handle_list, handle_session,
};
use member_console::constants::{BASE_URL_ENV, PASSWORD_ENV};
use member_console::error::ConsoleResult;
use member_console::interactive::run_interactive_mode;
use member_console::logging::{init_logging, log_error, log_panic_info};

fn username_arg() -> Arg {
    Arg::new("username")
        .long("username")
        .short('u')
        .value_name("USERNAME")
        .help("Login name (defaults to the configured username)")
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .short('p')
        .value_name("PASSWORD")
        .help(format!("Password (or set {})", PASSWORD_ENV))
}

fn member_field_args(command: Command, required: bool) -> Command {
    command
        .arg(
            Arg::new("first-name")
                .long("first-name")
                .value_name("NAME")
                .help("First name")
                .required(required)
        )
        .arg(
            Arg::new("last-name")
                .long("last-name")
                .value_name("NAME")
                .help("Last name")
                .required(required)
        )
        .arg(
            Arg::new("email")
                .long("email")
                .value_name("EMAIL")
                .help("Email address, also used as the login name")
                .required(required)
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .value_name("PHONE")
                .help("Phone number")
                .required(required)
        )
}

fn build_cli() -> Command {
    Command::new("members")
        .about("Member Console - manage team members from the terminal")
        .version("1.0.0")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help(format!("Backend origin (overrides {} and the config file)", BASE_URL_ENV))
        )
        .subcommand(
            Command::new("interactive")
                .about("Open the full-screen console (default)")
        )
        .subcommand(
            Command::new("session")
                .about("Check the backend session and token endpoints")
        )
        .subcommand(
            Command::new("config")
                .about("Show or change saved settings; --base-url is saved when given")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .value_name("USERNAME")
                        .help("Save the default login name")
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show current settings")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("list")
                .about("List team members")
                .arg(username_arg())
                .arg(password_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format: simple, table, json")
                        .default_value("simple")
                )
        )
        .subcommand(
            member_field_args(
                Command::new("add")
                    .about("Add a team member")
                    .arg(username_arg())
                    .arg(password_arg())
                    .arg(
                        Arg::new("admin")
                            .long("admin")
                            .help("Allow the member to delete users")
                            .action(ArgAction::SetTrue)
                    ),
                true,
            )
        )
        .subcommand(
            member_field_args(
                Command::new("edit")
                    .about("Edit a team member")
                    .arg(
                        Arg::new("email-key")
                            .value_name("MEMBER_EMAIL")
                            .help("Email of the member to edit")
                            .required(true)
                            .index(1)
                    )
                    .arg(username_arg())
                    .arg(password_arg())
                    .arg(
                        Arg::new("admin")
                            .long("admin")
                            .value_name("BOOL")
                            .help("Set admin rights: true or false")
                            .value_parser(value_parser!(bool))
                    ),
                false,
            )
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a team member")
                .arg(
                    Arg::new("email-key")
                        .value_name("MEMBER_EMAIL")
                        .help("Email of the member to delete")
                        .required(true)
                        .index(1)
                )
                .arg(username_arg())
                .arg(password_arg())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .help("Skip the confirmation prompt")
                        .action(ArgAction::SetTrue)
                )
        )
}

async fn dispatch(matches: &ArgMatches) -> ConsoleResult<()> {
    let base_url = matches.get_one::<String>("base-url").map(String::as_str);
    let mut context = CliContext::load(base_url)?;

    match matches.subcommand() {
        None | Some(("interactive", _)) => run_interactive_mode(&context).await,
        Some(("session", _)) => handle_session(&context).await,
        Some(("config", sub_matches)) => handle_config(sub_matches, &mut context).await,
        Some(("list", sub_matches)) => handle_list(sub_matches, &context).await,
        Some(("add", sub_matches)) => handle_add(sub_matches, &context).await,
        Some(("edit", sub_matches)) => handle_edit(sub_matches, &context).await,
        Some(("delete", sub_matches)) => handle_delete(sub_matches, &context).await,
        Some((other, _)) => {
            eprintln!("Unknown command '{}'. Use 'members --help' for available commands.", other);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));

    let matches = build_cli().get_matches();

    if let Err(e) = dispatch(&matches).await {
        log_error(&format!("Command failed: {}", e));
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_edit_admin_parses_bool() {
        let matches = build_cli()
            .try_get_matches_from(["members", "edit", "a@b.co", "--admin", "false"])
            .unwrap();
        let (_, edit) = matches.subcommand().unwrap();
        assert_eq!(edit.get_one::<bool>("admin"), Some(&false));
    }

    #[test]
    fn test_add_requires_every_field() {
        let result = build_cli().try_get_matches_from([
            "members", "add", "--first-name", "Ann", "--last-name", "Lee", "--email", "ann@b.co",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_is_global() {
        let matches = build_cli()
            .try_get_matches_from(["members", "list", "--base-url", "http://api.test"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("base-url").map(String::as_str),
            Some("http://api.test")
        );
    }
}
