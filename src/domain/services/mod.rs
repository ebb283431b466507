//! Pure domain services.

pub mod citation;

pub use citation::{MAX_CONTENT_WIDTH, attribution, display_width, format_citation};
