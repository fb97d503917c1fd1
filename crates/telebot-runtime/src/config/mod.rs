//! Configuration module for the Telebot runtime.
//!
//! Layered loading (defaults, files, environment) and validation of the bot
//! credentials, the update delivery mode and the logging setup.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, ENV_PREFIX, Profile, load_config, load_config_from_file};
pub use schema::{
    BotConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, PollingConfig, SpanEventConfig,
    TelebotConfig, UpdatesConfig, WebhookConfig,
};
pub use validation::validate_config;
