//! HTTP client transport: a reqwest-backed [`ApiCaller`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, trace};

use telebot_core::{ApiCaller, Endpoint, FormParams, TransportError, TransportResult};

/// Default API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Settings for [`HttpApiCaller`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API server root, e.g. `https://api.telegram.org`.
    pub api_url: String,
    /// Bot token.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Posts URL-encoded forms to `<api_url>/bot<token>/<endpoint>`.
///
/// The response body is returned whatever the HTTP status: the platform
/// reports failures as `{"ok": false, ...}` bodies, which the caller decodes.
pub struct HttpApiCaller {
    client: Client,
    base_url: String,
}

impl HttpApiCaller {
    /// Creates a caller from its configuration.
    pub fn new(config: &HttpClientConfig) -> TransportResult<Self> {
        if config.token.is_empty() {
            return Err(TransportError::InvalidConfig("bot token is empty".into()));
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;

        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.token
        );

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl ApiCaller for HttpApiCaller {
    async fn call(&self, endpoint: Endpoint, form: FormParams) -> TransportResult<String> {
        let url = format!("{}/{}", self.base_url, endpoint);

        // `without_url` keeps the token out of error messages.
        let response = self
            .client
            .post(&url)
            .form(form.as_pairs())
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(endpoint = %endpoint, status = status.as_u16(), "Non-success HTTP status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.without_url().to_string()))?;
        trace!(endpoint = %endpoint, len = body.len(), "Received response body");

        Ok(body)
    }
}

impl std::fmt::Debug for HttpApiCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiCaller").finish_non_exhaustive()
    }
}
