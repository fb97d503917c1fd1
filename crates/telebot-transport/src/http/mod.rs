//! HTTP transports.

#[cfg(feature = "http-client")]
mod client;
#[cfg(feature = "http-server")]
mod server;

#[cfg(feature = "http-client")]
pub use client::{DEFAULT_API_URL, HttpApiCaller, HttpClientConfig};
#[cfg(feature = "http-server")]
pub use server::{WebhookServer, serve_webhook, webhook_router};
