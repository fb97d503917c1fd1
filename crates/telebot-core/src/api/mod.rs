//! Outbound API layer.
//!
//! - [`ApiCaller`]: the transport seam ("post a form, read the body")
//! - [`Bot`]: typed calls built on top of it

pub mod bot;
pub mod caller;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use bot::{Bot, DICE_EMOJIS};
pub use caller::{ApiCaller, Endpoint, FormParams};
