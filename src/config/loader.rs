//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
/// Environment variable holding the Telegram chat id.
pub const ENV_CHAT_ID: &str = "CHAT_ID";
/// Environment variable holding a comma separated endpoint list.
pub const ENV_WEBSITES: &str = "WEBSITES";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay the process
/// environment, then validate.
pub fn load_config(path: Option<&Path>, require_notifier: bool) -> Result<MonitorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str::<MonitorConfig>(&content)?
        }
        None => MonitorConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config, require_notifier).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values on top of `config`.
///
/// `lookup` abstracts the environment so callers can supply a fixed map.
/// Unset or empty variables leave the existing value untouched.
pub fn apply_env_overrides<F>(config: &mut MonitorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = present(ENV_BOT_TOKEN) {
        config.telegram.bot_token = token.trim().to_string();
    }
    if let Some(chat_id) = present(ENV_CHAT_ID) {
        config.telegram.chat_id = chat_id.trim().to_string();
    }
    if let Some(websites) = present(ENV_WEBSITES) {
        config.endpoints = parse_endpoint_list(&websites);
    }
}

/// Split a comma separated list, trimming whitespace and dropping empty entries.
pub fn parse_endpoint_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
