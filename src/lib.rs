// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::MemberClient;
pub use config::{load_config, save_config, Config};
pub use console::{Console, ConsoleState, StateCommand};
pub use error::{ApiFailure, ConsoleError, ConsoleResult};
pub use models::*;
