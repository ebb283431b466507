//! Randcontent - random images, quotes and text snippets on command.
//!
//! This crate resolves configured chat commands into ready-to-send content:
//! a random picture from a local directory or a remote JSON list, a random
//! line of text, or a quote from a public citation API.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the content resolver and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for files, HTTP and configuration.
pub mod infrastructure;
/// Presentation layer containing the chat command surface.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "randcontent";
