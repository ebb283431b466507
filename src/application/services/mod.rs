//! Application services.

pub mod content_resolver;

pub use content_resolver::{ContentResolver, ResolverContext};
