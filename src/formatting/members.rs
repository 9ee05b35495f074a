use colored::*;

use crate::error::ConsoleResult;
use crate::models::Member;
use crate::validation::FieldErrors;
use super::utils::*;

/// Same layout the list screen uses: name, admin marker, then contact details.
pub fn print_members(members: &[Member], format: &str) -> ConsoleResult<()> {
    if members.is_empty() {
        println!("{}", "No members found.".dimmed());
        return Ok(());
    }

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(members)?;
            println!("{}", json);
        }
        "table" => {
            println!("{}", "─".repeat(100).dimmed());
            println!(
                "{:<28} {:<36} {:<18} {:<6}",
                "Name".bold(),
                "Email".bold(),
                "Phone".bold(),
                "Admin".bold()
            );
            println!("{}", "─".repeat(100).dimmed());

            for member in members {
                println!(
                    "{:<28} {:<36} {:<18} {:<6}",
                    truncate(&member.full_name(), 28),
                    truncate(&member.email, 36),
                    truncate(or_dash(member.phone()), 18),
                    admin_badge(member.is_admin())
                );
            }
            println!("{}", "─".repeat(100).dimmed());
        }
        _ => {
            for member in members {
                print_member_summary(member);
            }
        }
    }

    println!("\n{} members", members.len().to_string().bold());
    Ok(())
}

pub fn print_member_summary(member: &Member) {
    let badge = if member.is_admin() {
        format!(" ({})", admin_badge(true))
    } else {
        String::new()
    };
    println!("{}{}", member.full_name().bold(), badge);
    println!(
        "  Email: {}, Phone: {}",
        member.email.cyan(),
        or_dash(member.phone())
    );
}

pub fn print_member(member: &Member) {
    println!("{}: {}", "Name".bold(), member.full_name());
    println!("{}: {}", "Email".bold(), member.email);
    println!("{}: {}", "Username".bold(), member.username);
    println!("{}: {}", "Phone".bold(), or_dash(member.phone()));
    println!("{}: {}", "Admin".bold(), if member.is_admin() { "yes" } else { "no" });
    println!("{}: {}", "URL".bold(), member.url.bright_black());
}

pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{} {}: {}", "✗".red(), field.bold(), message);
    }
}
