//! Unified error types for the Telebot core.
//!
//! Transport failures, decode failures and `ok: false` replies all surface as
//! [`ApiError`] so callers (most notably the poll loop) can treat them alike.
//! Runtime-level errors (configuration, setup) live in `telebot-runtime`.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by an [`ApiCaller`](crate::api::ApiCaller) implementation.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The HTTP request could not be completed.
    #[error("request to '{endpoint}' failed: {reason}")]
    RequestFailed {
        /// The remote method that was being called.
        endpoint: String,
        /// Reason for failure.
        reason: String,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Error type for remote API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The call never produced a response body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not valid JSON of the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request parameter could not be serialized.
    #[error("failed to encode parameter '{field}': {reason}")]
    Encode {
        /// The form field being encoded.
        field: String,
        /// Serializer message.
        reason: String,
    },

    /// The remote platform answered with `ok: false`.
    #[error("API returned not ok ({}): {}", .error_code.map_or_else(|| "-".to_string(), |c| c.to_string()), .description.as_deref().unwrap_or("no description"))]
    NotOk {
        /// Numeric error code, when provided.
        error_code: Option<i64>,
        /// Human-readable description, when provided.
        description: Option<String>,
    },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
