//! Main runtime orchestration.
//!
//! [`BotRuntime`] owns the configuration, the [`Bot`] handle and the handler
//! [`Registry`]. Handlers are registered before [`run`](BotRuntime::run),
//! which then drives the configured update source until shutdown.
//!
//! ```rust,ignore
//! use telebot_runtime::BotRuntime;
//!
//! let runtime = BotRuntime::builder()
//!     .config_file("telebot.toml")
//!     .build()?;
//!
//! let bot = runtime.bot().clone();
//! runtime.registry().on_command("/ping", "Check the bot is alive", move |update| {
//!     let bot = bot.clone();
//!     async move { /* ... */ }
//! });
//!
//! runtime.run().await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use telebot_core::{ApiCaller, Bot, Dispatcher, Registry};
use telebot_transport::{HttpApiCaller, HttpClientConfig, WebhookServer};

use crate::config::{
    ConfigLoader, PollingConfig, TelebotConfig, UpdatesConfig, WebhookConfig, validate_config,
};
use crate::error::RuntimeResult;
use crate::logging;
use crate::polling::Poller;
use crate::webhook::WebhookEndpoint;

/// The bot runtime.
pub struct BotRuntime {
    config: TelebotConfig,
    bot: Bot,
    registry: Arc<Registry>,
}

impl BotRuntime {
    /// Creates a runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime talking to the real API over HTTP.
    ///
    /// Validates `config` and initializes logging from it.
    pub fn from_config(config: TelebotConfig) -> RuntimeResult<Self> {
        validate_config(&config)?;
        logging::init_from_config(&config.logging);

        let client_config = HttpClientConfig::new(config.bot.token.clone())
            .api_url(config.bot.api_url.clone())
            .timeout(config.bot.timeout());
        let caller = HttpApiCaller::new(&client_config)?;

        info!(
            mode = config.updates.mode(),
            log_level = %config.logging.level,
            "Runtime initialized from configuration"
        );

        Ok(Self::with_caller(config, Arc::new(caller)))
    }

    /// Creates a runtime over an arbitrary caller. Neither validates nor
    /// touches logging.
    pub fn with_caller(config: TelebotConfig, caller: Arc<dyn ApiCaller>) -> Self {
        Self {
            config,
            bot: Bot::new(caller),
            registry: Registry::new().into_shared(),
        }
    }

    pub fn config(&self) -> &TelebotConfig {
        &self.config
    }

    /// The API handle. Clone it into handlers.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// The handler registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// A dispatcher over this runtime's registry.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.registry))
    }

    /// Publishes the command menu collected from `on_command` registrations.
    pub async fn set_commands(&self) -> RuntimeResult<bool> {
        let commands = self.registry.commands();
        debug!(count = commands.len(), "Publishing command list");
        Ok(self.bot.set_commands(&commands).await?)
    }

    /// Runs until Ctrl+C or SIGTERM.
    pub async fn run(&self) -> RuntimeResult<()> {
        self.run_until(wait_for_shutdown()).await
    }

    /// Runs until `shutdown` resolves.
    ///
    /// # Errors
    /// Only setup failures: an unusable webhook URL, a rejected webhook
    /// registration or a listener that cannot bind. Poll failures are logged
    /// and retried.
    pub async fn run_until<F>(&self, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            handlers = self.registry.len(),
            mode = self.config.updates.mode(),
            "Starting Telebot runtime"
        );

        match &self.config.updates {
            UpdatesConfig::Polling(polling) => self.run_polling(polling, shutdown).await,
            UpdatesConfig::Webhook(webhook) => self.run_webhook(webhook, shutdown).await,
        }?;

        info!("Runtime stopped");
        Ok(())
    }

    async fn run_polling<F>(&self, config: &PollingConfig, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()>,
    {
        // A leftover webhook makes getUpdates fail with a conflict.
        if let Err(e) = self.bot.delete_webhook().await {
            warn!(error = %e, "Failed to delete webhook before polling");
        }

        let cancel = CancellationToken::new();
        let poller = Poller::new(self.bot.clone(), self.dispatcher(), config.interval());
        let poll = poller.run(cancel.clone());
        tokio::pin!(poll);

        tokio::select! {
            _ = &mut poll => {}
            _ = shutdown => {
                cancel.cancel();
                poll.await;
            }
        }

        Ok(())
    }

    async fn run_webhook<F>(&self, config: &WebhookConfig, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let endpoint = WebhookEndpoint::from_config(config, &self.config.bot.token)?;

        let server =
            WebhookServer::bind(&endpoint.bind_addr, &endpoint.route_path, self.dispatcher())
                .await
                .inspect_err(|e| error!(error = %e, "Failed to bind webhook listener"))?;

        let accepted = self
            .bot
            .set_webhook(&endpoint.register_url, endpoint.ip_address.as_deref())
            .await
            .inspect_err(|e| error!(error = %e, "Failed to register webhook"))?;
        if !accepted {
            warn!("Webhook registration returned false");
        }

        server.serve(shutdown).await?;
        Ok(())
    }
}

impl std::fmt::Debug for BotRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRuntime")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Waits for Ctrl+C, or SIGTERM on unix.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {
                        info!("Received Ctrl+C, shutting down");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down");
                    }
                }
                return;
            }
            Err(e) => warn!(error = %e, "Failed to register SIGTERM handler"),
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Loads configuration and builds a [`BotRuntime`].
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g. "development", "production").
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges base configuration programmatically.
    pub fn merge(mut self, config: TelebotConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    pub fn build(self) -> RuntimeResult<BotRuntime> {
        let config = self.config_loader.load()?;
        BotRuntime::from_config(config)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
