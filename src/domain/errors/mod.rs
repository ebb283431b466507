//! Domain error types.

mod content_error;
mod file_error;

pub use content_error::ContentError;
pub use file_error::FileError;
