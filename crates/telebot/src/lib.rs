//! # Telebot
//!
//! An async, strongly-typed Telegram bot library for Rust.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌────────────┐     ┌──────────────────────┐
//! │  Update source   │────▶│ Dispatcher │────▶│ command "/start"     │──▶ Bot API
//! │ (poll / webhook) │     │            │────▶│ text "hello"         │──▶ Bot API
//! └──────────────────┘     └────────────┘────▶│ payload "page_"      │──▶ Bot API
//!                                             └──────────────────────┘
//! ```
//!
//! - **Runtime**: loads configuration, sets up logging, drives the update source
//! - **Dispatcher**: classifies each update and invokes every matching handler
//! - **Bot**: typed outbound calls (messages, keyboards, dice, callbacks, admin)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use telebot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = BotRuntime::builder().build()?;
//!     let bot = runtime.bot().clone();
//!
//!     runtime.registry().on_command("/start", "Say hello", move |update: Arc<Update>| {
//!         let bot = bot.clone();
//!         async move {
//!             let chat_id = update.chat_id().unwrap_or_default();
//!             bot.send_text_message(chat_id, "Hello!", SendMessageOptions::default()).await?;
//!             Ok::<_, ApiError>(())
//!         }
//!     });
//!
//!     runtime.set_commands().await?;
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): `telebot.toml` configuration files
//! - `yaml-config`: `telebot.yaml` configuration files
//! - `json-log`: JSON log output
//! - `test-util`: in-memory `ApiCaller` for tests

pub use telebot_core as core;
pub use telebot_runtime as runtime;
pub use telebot_transport as transport;

/// Commonly used types for building bots.
///
/// ```rust,ignore
/// use telebot::prelude::*;
/// ```
pub mod prelude {
    pub use std::sync::Arc;

    // Runtime
    pub use telebot_runtime::{BotRuntime, RuntimeError, RuntimeResult, TelebotConfig};

    // Dispatch
    pub use telebot_core::{Dispatcher, EventKind, Registry};

    // API
    pub use telebot_core::{ApiError, ApiResult, Bot, DICE_EMOJIS};

    // Model
    pub use telebot_core::model::*;

    // Logging
    pub use telebot_runtime::prelude::*;
}
