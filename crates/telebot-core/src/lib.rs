//! # Telebot Core
//!
//! The core engine of the Telebot bot library.
//!
//! This crate provides everything that does not depend on a concrete network
//! stack: the wire model, the dispatch pipeline and the typed API surface.
//!
//! ## Layers
//!
//! - **Model**: update, message, keyboard and envelope types ([`Update`], [`ApiResponse`])
//! - **Framework**: event kinds, handlers, registry and dispatcher
//!   ([`EventKind`], [`Handler`], [`Registry`], [`Dispatcher`])
//! - **API**: the transport seam and typed calls ([`ApiCaller`], [`Bot`])
//!
//! ## Dispatch Flow
//!
//! ```text
//! ┌───────────────┐     ┌────────────┐     ┌──────────┐     ┌───────────┐
//! │ Update Source │────▶│ Classifier │────▶│ Registry │────▶│  Handler  │
//! │ (poll / push) │     │ (EventKind)│     │ + filters│────▶│  Handler  │
//! └───────────────┘     └────────────┘     └──────────┘     └───────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use telebot_core::{Dispatcher, Registry, Update};
//!
//! let registry = Registry::new();
//! registry.on_text("hello", |update: Arc<Update>| async move {
//!     println!("greeted in chat {:?}", update.chat_id());
//! });
//!
//! let dispatcher = Dispatcher::new(registry.into_shared());
//! dispatcher.dispatch(update).await;
//! ```

pub mod api;
pub mod error;
pub mod framework;
pub mod model;

pub use api::{ApiCaller, Bot, DICE_EMOJIS, Endpoint, FormParams};
pub use error::{ApiError, ApiResult, TransportError, TransportResult};
pub use framework::{
    BoxedHandler, Dispatcher, EventKind, Handler, HandlerOutput, Registration, Registry, classify,
    into_handler,
};
pub use model::{
    ApiResponse, BotCommand, CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup,
    KeyboardButton, Message, ParseMode, ReplyKeyboardMarkup, ReplyKeyboardRemove,
    SendMessageOptions, Update, User,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::api::{Bot, Endpoint, FormParams};
    pub use super::error::{ApiError, ApiResult};
    pub use super::framework::{Dispatcher, EventKind, Registry};
    pub use super::model::*;
}
