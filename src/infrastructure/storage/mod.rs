//! Filesystem adapters: content sources and the remote list cache.

pub mod file_store;
pub mod json_cache;

pub use file_store::{FileResult, FileStore, is_image_file, mime_type};
pub use json_cache::{DEFAULT_CACHE_NAME, JsonListCache, content_dir};
