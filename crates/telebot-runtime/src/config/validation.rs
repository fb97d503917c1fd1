//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{BotConfig, LogOutput, LoggingConfig, TelebotConfig, UpdatesConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &TelebotConfig) -> ConfigResult<()> {
    validate_bot_config(&config.bot)?;
    validate_updates_config(&config.updates)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_bot_config(bot: &BotConfig) -> ConfigResult<()> {
    if bot.token.trim().is_empty() {
        return Err(ConfigError::missing_field("bot.token"));
    }

    if bot.timeout_ms == 0 {
        return Err(ConfigError::validation("Timeout must be greater than 0"));
    }

    validate_url(&bot.api_url)?;

    Ok(())
}

fn validate_updates_config(updates: &UpdatesConfig) -> ConfigResult<()> {
    match updates {
        UpdatesConfig::Polling(polling) => {
            if polling.interval_ms == 0 {
                return Err(ConfigError::validation(
                    "Polling interval must be greater than 0",
                ));
            }
        }
        UpdatesConfig::Webhook(webhook) => {
            validate_url(&webhook.url)?;
            validate_port(webhook.port)?;
            if webhook.host.is_empty() {
                return Err(ConfigError::missing_field("updates.host"));
            }
        }
    }

    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }
    Ok(())
}

/// Validates an http(s) URL.
fn validate_url(url: &str) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::missing_field("url"));
    }

    let valid_schemes = ["http://", "https://"];
    if !valid_schemes.iter().any(|s| url.starts_with(s)) {
        return Err(ConfigError::invalid_url(
            url,
            format!("URL must start with one of: {:?}", valid_schemes),
        ));
    }

    Ok(())
}

/// Validates a port number.
fn validate_port(port: u16) -> ConfigResult<()> {
    if port == 0 {
        return Err(ConfigError::InvalidPort(port));
    }
    Ok(())
}
