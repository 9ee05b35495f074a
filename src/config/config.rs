use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_URL_ENV, CONFIG_FILE, DEFAULT_BASE_URL};
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:8000`.
    pub base_url: Option<String>,
    /// Default login for the one-shot commands.
    pub username: Option<String>,
}

pub fn config_path() -> ConsoleResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ConsoleError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> ConsoleResult<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> ConsoleResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let config_str = fs::read_to_string(path)?;
    serde_json::from_str(&config_str)
        .map_err(|e| ConsoleError::ConfigError(format!("{}: {}", path.display(), e)))
}

pub fn save_config(config: &Config) -> ConsoleResult<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> ConsoleResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

/// Pick the backend origin: explicit flag, then environment, then config file, then default.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    let chosen = flag
        .map(str::to_string)
        .or_else(|| env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()))
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    chosen.trim().trim_end_matches('/').to_string()
}
