//! Update dispatcher.
//!
//! For every update the [`Dispatcher`]:
//!
//! 1. Classifies it into the event kinds it is eligible for
//! 2. Looks up the registrations of each kind in the [`Registry`]
//! 3. Evaluates each filter with the kind's matching rule
//! 4. Awaits every matching handler, one after the other
//!
//! Every matching handler runs, in registration order; there is no priority
//! and no blocking between kinds.
//!
//! ```rust,ignore
//! use telebot_core::{Dispatcher, Registry};
//!
//! let registry = Registry::new();
//! registry.on_command("/start", "Start the bot", start_handler);
//!
//! let dispatcher = Dispatcher::new(registry.into_shared());
//! dispatcher.dispatch(update).await;
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use tower::Service;
use tracing::{Instrument, Level, debug, span, trace};

use crate::framework::event::classify;
use crate::framework::handler::BoxedHandler;
use crate::framework::registry::Registry;
use crate::model::Update;

/// The central update dispatcher.
///
/// `Dispatcher` is cheap to clone and `Send + Sync`; clones share the same
/// registry.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this dispatcher reads from.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Collects the handlers whose filter matches `update`.
    pub fn matching_handlers(&self, update: &Update) -> Vec<BoxedHandler> {
        let mut matched = Vec::new();

        for (kind, value) in classify(update) {
            for registration in self.registry.handlers_for(kind) {
                if kind.matches(&registration.filter, value) {
                    trace!(kind = %kind, filter = %registration.filter, "Filter matched");
                    matched.push(registration.handler);
                }
            }
        }

        matched
    }

    /// Dispatches `update` to every matching handler.
    ///
    /// Returns the number of handlers invoked. An update matching nothing is
    /// silently dropped.
    pub async fn dispatch(&self, update: Update) -> usize {
        let span = span!(Level::DEBUG, "dispatch", update_id = update.update_id);

        async move {
            let handlers = self.matching_handlers(&update);
            if handlers.is_empty() {
                trace!("No handler matched");
                return 0;
            }

            debug!(handler_count = handlers.len(), "Invoking handlers");
            let update = Arc::new(update);
            for handler in &handlers {
                handler.call(Arc::clone(&update)).await;
            }
            handlers.len()
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}

/// Tower Service implementation, so transports can stack middleware
/// (timeouts, concurrency limits, tracing) in front of dispatch.
impl Service<Update> for Dispatcher {
    type Response = usize;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<usize, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, update: Update) -> Self::Future {
        let dispatcher = self.clone();
        async move { Ok(dispatcher.dispatch(update).await) }.boxed()
    }
}
