//! Handler abstraction.
//!
//! Any async closure or function taking an `Arc<Update>` is a [`Handler`]:
//!
//! ```rust,ignore
//! registry.on_command("/ping", "Check the bot is alive", move |update: Arc<Update>| {
//!     let bot = bot.clone();
//!     async move {
//!         if let Some(chat_id) = update.chat_id() {
//!             bot.send_text_message(chat_id, "pong", SendMessageOptions::default()).await?;
//!         }
//!         Ok::<_, ApiError>(())
//!     }
//! });
//! ```
//!
//! Handlers may return `()` or `Result<(), E>`. Errors are logged and never
//! reach the dispatcher; a handler is responsible for its own faults.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::error;

use crate::model::Update;

// ============================================================================
// HandlerOutput - what a handler may return
// ============================================================================

/// Values a handler future may resolve to.
pub trait HandlerOutput: Send {
    /// Consumes the value, reporting failures through the log.
    fn finish(self);
}

impl HandlerOutput for () {
    fn finish(self) {}
}

impl<E: Display + Send> HandlerOutput for Result<(), E> {
    fn finish(self) {
        if let Err(e) = self {
            error!(error = %e, "Handler failed");
        }
    }
}

// ============================================================================
// Handler
// ============================================================================

/// A callback invoked with every update matching its filter.
pub trait Handler: Send + Sync + 'static {
    /// Runs the handler to completion.
    fn call(&self, update: Arc<Update>) -> BoxFuture<'static, ()>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Arc<Update>) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: HandlerOutput,
{
    fn call(&self, update: Arc<Update>) -> BoxFuture<'static, ()> {
        (self)(update).map(HandlerOutput::finish).boxed()
    }
}

/// A type-erased, shareable handler.
pub type BoxedHandler = Arc<dyn Handler>;

/// Erases a handler's concrete type.
pub fn into_handler<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}
