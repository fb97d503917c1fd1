//! Handler registry.
//!
//! The [`Registry`] maps every [`EventKind`] to an ordered list of
//! `(filter, handler)` pairs. It is built once at startup and then shared
//! (usually as `Arc<Registry>`) with the dispatcher. Lookups take a snapshot
//! of the list, so handlers never run while a lock is held and concurrent
//! webhook requests can dispatch in parallel.
//!
//! # Duplicate filters
//!
//! Registering a filter that already exists under the same kind replaces the
//! previous handler in place: the registration keeps its original position,
//! the old handler is dropped and a warning is logged.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::framework::event::EventKind;
use crate::framework::handler::{BoxedHandler, Handler, into_handler};
use crate::model::BotCommand;

/// A filter together with the handler it triggers.
#[derive(Clone)]
pub struct Registration {
    /// Filter string, compared according to the kind's rule.
    pub filter: String,
    /// Handler invoked on match.
    pub handler: BoxedHandler,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Mapping from event kind to its registered handlers.
#[derive(Default)]
pub struct Registry {
    handlers: RwLock<HashMap<EventKind, Vec<Registration>>>,
    commands: RwLock<Vec<BotCommand>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `(kind, filter)`.
    ///
    /// Returns `true` if an existing handler for the same pair was replaced.
    pub fn register<H: Handler>(&self, kind: EventKind, filter: impl Into<String>, handler: H) -> bool {
        self.register_boxed(kind, filter, into_handler(handler))
    }

    /// Registers a pre-built boxed handler.
    pub fn register_boxed(
        &self,
        kind: EventKind,
        filter: impl Into<String>,
        handler: BoxedHandler,
    ) -> bool {
        let filter = filter.into();
        let mut handlers = self.handlers.write();
        let entries = handlers.entry(kind).or_default();

        if let Some(existing) = entries.iter_mut().find(|r| r.filter == filter) {
            warn!(kind = %kind, filter = %filter, "Handler already registered, replacing it");
            existing.handler = handler;
            return true;
        }

        debug!(kind = %kind, filter = %filter, "Registered handler");
        entries.push(Registration { filter, handler });
        false
    }

    /// Triggers `handler` when the message text equals `text`.
    pub fn on_text<H: Handler>(&self, text: impl Into<String>, handler: H) -> bool {
        self.register(EventKind::Text, text, handler)
    }

    /// Triggers `handler` when the message text starts with the `/command`.
    ///
    /// The command is also recorded for [`commands`](Self::commands) when
    /// `description` is long enough to be published.
    pub fn on_command<H: Handler>(
        &self,
        command: impl Into<String>,
        description: &str,
        handler: H,
    ) -> bool {
        let command = command.into();
        if let Some(descriptor) = BotCommand::from_filter(&command, description) {
            let mut commands = self.commands.write();
            match commands.iter_mut().find(|c| c.command == descriptor.command) {
                Some(existing) => *existing = descriptor,
                None => commands.push(descriptor),
            }
        }
        self.register(EventKind::Command, command, handler)
    }

    /// Triggers `handler` when the callback data equals `data`.
    pub fn on_callback<H: Handler>(&self, data: impl Into<String>, handler: H) -> bool {
        self.register(EventKind::CallbackExact, data, handler)
    }

    /// Triggers `handler` when the callback data starts with `prefix`.
    pub fn on_payload<H: Handler>(&self, prefix: impl Into<String>, handler: H) -> bool {
        self.register(EventKind::CallbackPrefix, prefix, handler)
    }

    /// Returns a snapshot of the registrations for `kind`, in registration order.
    pub fn handlers_for(&self, kind: EventKind) -> Vec<Registration> {
        self.handlers
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the command descriptors recorded so far.
    pub fn commands(&self) -> Vec<BotCommand> {
        self.commands.read().clone()
    }

    /// Returns the total number of registrations across all kinds.
    pub fn len(&self) -> usize {
        self.handlers.read().values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wraps the registry for sharing with a dispatcher.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        let mut dbg = f.debug_struct("Registry");
        for kind in EventKind::ALL {
            dbg.field(kind.name(), &handlers.get(&kind).map_or(0, Vec::len));
        }
        dbg.field("commands", &self.commands.read().len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Update;

    async fn noop(_update: Arc<Update>) {}

    #[test]
    fn test_empty_kind() {
        let registry = Registry::new();
        assert!(registry.handlers_for(EventKind::Text).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::new();
        registry.on_payload("a", noop);
        registry.on_payload("b", noop);
        registry.on_payload("c", noop);

        let filters: Vec<_> = registry
            .handlers_for(EventKind::CallbackPrefix)
            .into_iter()
            .map(|r| r.filter)
            .collect();
        assert_eq!(filters, ["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let registry = Registry::new();
        assert!(!registry.on_text("a", noop));
        assert!(!registry.on_text("b", noop));
        assert!(registry.on_text("a", noop));

        let filters: Vec<_> = registry
            .handlers_for(EventKind::Text)
            .into_iter()
            .map(|r| r.filter)
            .collect();
        assert_eq!(filters, ["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_same_filter_different_kinds() {
        let registry = Registry::new();
        assert!(!registry.on_text("go", noop));
        assert!(!registry.on_callback("go", noop));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_command_descriptors() {
        let registry = Registry::new();
        registry.on_command("/start", "Start the bot", noop);
        registry.on_command("/hidden", "", noop);
        registry.on_command("help", "Show help", noop);
        registry.on_command("/start", "Restart the bot", noop);

        let commands = registry.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].command, "start");
        assert_eq!(commands[0].description, "Restart the bot");
        assert_eq!(commands[1].command, "help");

        // Commands without a publishable description still dispatch.
        assert_eq!(registry.handlers_for(EventKind::Command).len(), 3);
    }
}
