//! Presentation layer: the chat-facing command surface.

/// Command registration and text dispatch.
pub mod commands;

pub use commands::{CommandRegistry, Invocation, PARENT_COMMAND};
