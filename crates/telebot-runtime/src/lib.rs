//! Telebot Runtime - orchestration layer for the Telebot bot library.
//!
//! This crate provides:
//! - Layered configuration (`telebot.toml`, `TELEBOT_*` environment variables)
//! - Logging setup
//! - The poll-mode update source ([`Poller`])
//! - Push-mode setup: webhook registration and the HTTP listener
//! - [`BotRuntime`], which wires all of the above together
//!
//! ```rust,ignore
//! use telebot_runtime::BotRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = BotRuntime::builder().build()?;
//!
//!     runtime.registry().on_text("hello", |update| async move {
//!         tracing::info!(chat_id = ?update.chat_id(), "Greeted");
//!     });
//!
//!     // Run until Ctrl+C
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod polling;
pub mod runtime;
pub mod webhook;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LoggingConfig, TelebotConfig, UpdatesConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use polling::Poller;
pub use runtime::{BotRuntime, RuntimeBuilder};
pub use webhook::WebhookEndpoint;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros and span helpers.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
