//! Domain layer with core content entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{CommandDefinition, Content, ContentKind, ContentResult, ImageFormat};
pub use errors::{ContentError, FileError};
pub use ports::{FetchRequest, FetchResponse, HttpError, HttpPort};
