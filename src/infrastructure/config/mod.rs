//! Application configuration.

/// Configuration file model.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Configuration file access.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, TimeoutConfig, default_commands};
pub use args::CliArgs;
pub use storage::{ConfigError, ConfigOrigin, StorageManager};
