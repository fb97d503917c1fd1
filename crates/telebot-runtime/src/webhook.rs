//! Push-mode endpoint derivation.
//!
//! The bot token is appended to the configured URL so that only the platform,
//! which knows the token, can reach the route.

use url::Url;

use crate::config::WebhookConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// Everything needed to register and serve a webhook.
#[derive(Clone)]
pub struct WebhookEndpoint {
    /// URL registered with the platform: `<url><token>`.
    pub register_url: String,
    /// Local route: `<path of url><token>`.
    pub route_path: String,
    /// `host:port` to bind.
    pub bind_addr: String,
    pub ip_address: Option<String>,
}

impl WebhookEndpoint {
    /// Derives the endpoint from configuration.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidWebhookUrl`] when `url` is not an absolute
    /// http(s) URL.
    pub fn from_config(config: &WebhookConfig, token: &str) -> RuntimeResult<Self> {
        let invalid = |reason: String| RuntimeError::InvalidWebhookUrl {
            url: config.url.clone(),
            reason,
        };

        let parsed = Url::parse(&config.url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".into()));
        }

        // A bare host parses with path "/", so both values share one path.
        let mut register = parsed.clone();
        register.set_path(&format!("{}{token}", parsed.path()));

        Ok(Self {
            route_path: register.path().to_string(),
            register_url: register.into(),
            bind_addr: config.bind_addr(),
            ip_address: config.ip_address.clone(),
        })
    }
}

// Both URLs embed the token.
impl std::fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("bind_addr", &self.bind_addr)
            .field("ip_address", &self.ip_address)
            .finish_non_exhaustive()
    }
}
