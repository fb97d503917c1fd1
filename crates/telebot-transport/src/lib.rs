//! # Telebot Transport
//!
//! Network transports for the Telebot bot library.
//!
//! `telebot-core` only knows the [`ApiCaller`](telebot_core::ApiCaller) seam
//! and the [`Dispatcher`](telebot_core::Dispatcher). This crate puts real
//! sockets behind them.
//!
//! ## Features
//!
//! - `http-client`: reqwest-backed [`HttpApiCaller`] posting URL-encoded forms
//! - `http-server`: axum-backed [`WebhookServer`] receiving pushed updates
//! - `full`: both
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  telebot-runtime    │  (polling loop, webhook setup)
//! ├─────────────────────┤
//! │  telebot-core       │  (Bot, Dispatcher, ApiCaller)
//! ├─────────────────────┤
//! │  telebot-transport  │  <- This crate
//! ├─────────────────────┤
//! │  Network (HTTP)     │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use telebot_core::Bot;
//! use telebot_transport::{HttpApiCaller, HttpClientConfig};
//!
//! let caller = HttpApiCaller::new(&HttpClientConfig::new(token))?;
//! let bot = Bot::new(Arc::new(caller));
//! bot.send_text_message(chat_id, "hello", Default::default()).await?;
//! ```

#[cfg(any(feature = "http-client", feature = "http-server"))]
pub mod http;

#[cfg(feature = "http-client")]
pub use http::{DEFAULT_API_URL, HttpApiCaller, HttpClientConfig};

#[cfg(feature = "http-server")]
pub use http::{WebhookServer, serve_webhook, webhook_router};
