//! Runtime error types.

use thiserror::Error;

use telebot_core::{ApiError, TransportError};

use crate::config::ConfigError;

/// Errors that stop the runtime.
///
/// Poll-cycle failures never surface here; they are logged and retried on the
/// next tick. Only setup problems (configuration, webhook registration,
/// listener binding) are returned.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A setup call to the remote API failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A transport could not be created or bound.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The configured webhook URL cannot be used.
    #[error("Invalid webhook URL {url}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
