use crate::client::MemberClient;
use crate::config::{load_config, resolve_base_url, save_config, Config};
use crate::console::Console;
use crate::error::ConsoleResult;

/// Central context for CLI operations: resolved configuration and the backend origin
pub struct CliContext {
    config: Config,
    base_url: String,
}

impl CliContext {
    /// Load context from saved configuration, letting `base_url_flag` override it
    pub fn load(base_url_flag: Option<&str>) -> ConsoleResult<Self> {
        let config = load_config()?;
        let base_url = resolve_base_url(base_url_flag, &config);
        Ok(Self { config, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default login name for the one-shot commands
    pub fn default_username(&self) -> Option<&str> {
        self.config.username.as_deref()
    }

    /// Build a fresh client; each one starts with an empty cookie store
    pub fn client(&self) -> ConsoleResult<MemberClient> {
        MemberClient::new(self.base_url.clone())
    }

    /// Build a console bound to a fresh client
    pub fn console(&self) -> ConsoleResult<Console> {
        Ok(Console::new(self.client()?))
    }

    /// Persist a new backend origin and switch to it
    pub fn set_base_url(&mut self, base_url: &str) -> ConsoleResult<()> {
        let trimmed = base_url.trim().trim_end_matches('/').to_string();
        self.config.base_url = Some(trimmed.clone());
        save_config(&self.config)?;
        self.base_url = trimmed;
        Ok(())
    }

    /// Persist the default login name
    pub fn set_username(&mut self, username: &str) -> ConsoleResult<()> {
        self.config.username = Some(username.to_string());
        save_config(&self.config)
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    base_url: Option<String>,
    username: Option<String>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            username: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Without an explicit origin this falls back to the saved configuration
    pub fn build(self) -> ConsoleResult<CliContext> {
        let mut context = match self.base_url {
            Some(base_url) => {
                let config = Config {
                    base_url: Some(base_url.clone()),
                    username: None,
                };
                CliContext {
                    base_url: resolve_base_url(Some(base_url.as_str()), &config),
                    config,
                }
            }
            None => CliContext::load(None)?,
        };

        if let Some(username) = self.username {
            context.config.username = Some(username);
        }

        Ok(context)
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
