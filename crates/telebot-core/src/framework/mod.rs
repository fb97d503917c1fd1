//! Framework layer: event kinds, handlers, registry and dispatch.

pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use event::{EventKind, classify};
pub use handler::{BoxedHandler, Handler, HandlerOutput, into_handler};
pub use registry::{Registration, Registry};
