//! Infrastructure layer with external service adapters.

/// Quote API clients.
pub mod citation;
/// Application configuration.
pub mod config;
/// Outgoing HTTP.
pub mod http;
/// Remote image download.
pub mod image;
/// Content files and the remote list cache.
pub mod storage;

pub use citation::CitationClient;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager, TimeoutConfig};
pub use http::ReqwestHttpClient;
pub use image::{ImageFetcher, is_pixiv_url};
pub use storage::{FileStore, JsonListCache};
