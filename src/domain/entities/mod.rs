//! Domain entity definitions.

mod command;
mod content;
mod image_format;

pub use command::{CommandDefinition, ContentKind};
pub use content::{Content, ContentResult};
pub use image_format::ImageFormat;
