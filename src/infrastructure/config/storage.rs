//! Configuration file access.

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory is available.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// The configuration loaded but is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Reading or writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be encoded.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// The configuration could not be decoded.
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Where a loaded configuration came from.
///
/// Loading usually happens before logging is set up, so the outcome is
/// returned and reported later through [`ConfigOrigin::log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from an existing file.
    File(PathBuf),
    /// The file was missing and has been written with the defaults.
    Created(PathBuf),
    /// The file failed to parse; the defaults are in use and the file is untouched.
    Fallback {
        /// Offending file.
        path: PathBuf,
        /// Parser message.
        error: String,
    },
}

impl ConfigOrigin {
    /// Returns whether the defaults replaced an unreadable file.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Logs how the configuration was obtained.
    pub fn log(&self) {
        match self {
            Self::File(path) => debug!(path = %path.display(), "Loaded config file"),
            Self::Created(path) => {
                info!(path = %path.display(), "Config file not found, created default");
            }
            Self::Fallback { path, error } => warn!(
                path = %path.display(),
                error = %error,
                "Failed to parse config file. Using defaults."
            ),
        }
    }
}

/// Locates, reads and writes the configuration file.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!("Creating configuration directory at {:?}", self.config_dir);
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Loads the application configuration.
    ///
    /// A missing file is created with the built-in command table. A file that
    /// fails to parse is left untouched and the defaults are used instead;
    /// the returned [`ConfigOrigin`] says which happened.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or written.
    pub fn load_config(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigOrigin), ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            std::path::Path::to_path_buf,
        );

        if !config_path.exists() {
            let default_config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&config_path, &default_config)?;
            return Ok((default_config, ConfigOrigin::Created(config_path)));
        }

        let content = fs::read_to_string(&config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok((config, ConfigOrigin::File(config_path))),
            Err(e) => Ok((
                AppConfig::default(),
                ConfigOrigin::Fallback {
                    path: config_path,
                    error: e.message().to_string(),
                },
            )),
        }
    }

    /// Saves the application configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        Self::save_to_file(&self.config_dir.join(CONFIG_FILE_NAME), config)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CommandDefinition, ContentKind};
    use tempfile::tempdir;

    #[test]
    fn test_ensure_config_dir_creates_directory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("randcontent");
        let manager = StorageManager::with_dir(config_path.clone());

        assert!(!config_path.exists());
        manager.ensure_config_dir().unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let (config, origin) = manager.load_config(None).unwrap();
        assert_eq!(config.commands.len(), 5);

        let config_file = dir.path().join(CONFIG_FILE_NAME);
        assert!(config_file.exists());
        assert_eq!(origin, ConfigOrigin::Created(config_file.clone()));

        let (reloaded, origin) = manager.load_config(None).unwrap();
        assert_eq!(origin, ConfigOrigin::File(config_file));
        assert_eq!(reloaded.commands, config.commands);
        assert_eq!(reloaded.timeouts, config.timeouts);
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "commands = [").unwrap();

        let (config, origin) = manager.load_config(None).unwrap();
        assert_eq!(config.commands.len(), 5);
        assert!(origin.is_fallback());
        match origin {
            ConfigOrigin::Fallback { path, error } => {
                assert_eq!(path, config_file);
                assert!(!error.is_empty());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "commands = [");
    }

    #[test]
    fn test_load_config_from_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("bot.toml");
        fs::write(
            &custom,
            "[[commands]]\nname = \"quotes\"\ntype = \"text\"\nsource = \"q.json\"\n",
        )
        .unwrap();

        let (config, _) = manager.load_config(Some(&custom)).unwrap();
        assert_eq!(
            config.commands,
            vec![CommandDefinition::new("quotes", "", ContentKind::Text, "q.json")]
        );
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let mut config = AppConfig::default();
        config.base_dir = Some(PathBuf::from("/srv/bot"));
        config.commands.truncate(1);
        manager.save_config(&config).unwrap();

        let (loaded, _) = manager.load_config(None).unwrap();
        assert_eq!(loaded.base_dir, Some(PathBuf::from("/srv/bot")));
        assert_eq!(loaded.commands.len(), 1);
        assert_eq!(loaded.commands[0].name, "pixiv");
    }
}
