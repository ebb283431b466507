//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use super::storage::ConfigError;
use crate::domain::entities::{CommandDefinition, ContentKind};

pub(super) const APP_NAME: &str = "randcontent";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "linuxmobile";

const DEFAULT_PIXIV_LIST: &str =
    "https://raw.githubusercontent.com/YisRime/koishi-plugin-onebot-tool/main/resource/pixiv.json";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_tracing_level().as_str().to_lowercase())
    }
}

/// Network timeouts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Quote API requests.
    #[serde(default = "default_citation_secs")]
    pub citation_secs: u64,

    /// Remote JSON list downloads.
    #[serde(default = "default_list_secs")]
    pub list_secs: u64,

    /// Remote image downloads.
    #[serde(default = "default_image_secs")]
    pub image_secs: u64,
}

impl TimeoutConfig {
    /// Quote API timeout.
    #[must_use]
    pub const fn citation(&self) -> Duration {
        Duration::from_secs(self.citation_secs)
    }

    /// List download timeout.
    #[must_use]
    pub const fn list(&self) -> Duration {
        Duration::from_secs(self.list_secs)
    }

    /// Image download timeout.
    #[must_use]
    pub const fn image(&self) -> Duration {
        Duration::from_secs(self.image_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            citation_secs: default_citation_secs(),
            list_secs: default_list_secs(),
            image_secs: default_image_secs(),
        }
    }
}

const fn default_citation_secs() -> u64 {
    3
}

const fn default_list_secs() -> u64 {
    60
}

const fn default_image_secs() -> u64 {
    30
}

/// Returns the built-in command table.
#[must_use]
pub fn default_commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "pixiv",
            "随机 Pixiv 图片",
            ContentKind::Image,
            DEFAULT_PIXIV_LIST,
        ),
        CommandDefinition::new("hitokoto", "随机一言", ContentKind::Hitokoto, ""),
        CommandDefinition::new("sjsc", "随机诗词", ContentKind::P6oy, "poetry"),
        CommandDefinition::new("djt", "随机毒鸡汤", ContentKind::P6oy, "chicken"),
        CommandDefinition::new("tgrj", "随机舔狗日记", ContentKind::P6oy, "dog"),
    ]
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Root for `data/content` cache files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Network timeouts.
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Configured sub-commands, in registration order.
    #[serde(default = "default_commands")]
    pub commands: Vec<CommandDefinition>,
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_dir) = &args.base_dir {
            self.base_dir = Some(base_dir.clone());
        }
    }

    /// Checks that every command has a unique name usable both as a chat
    /// word and as a cache file stem.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` describing the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, command) in self.commands.iter().enumerate() {
            let name = command.name.as_str();
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "command #{} has an empty name",
                    index + 1
                )));
            }
            if name.contains(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "command name '{name}' contains whitespace"
                )));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::Invalid(format!(
                    "command name '{name}' is not a valid file name"
                )));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate command name '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Returns default data directory.
    #[must_use]
    pub fn default_base_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns effective data directory.
    #[must_use]
    pub fn effective_base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(Self::default_base_dir)
            .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_level: LogLevel::Info,
            log_path: None,
            base_dir: None,
            timeouts: TimeoutConfig::default(),
            commands: default_commands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.timeouts.citation(), Duration::from_secs(3));
        assert_eq!(config.timeouts.list(), Duration::from_secs(60));
        assert_eq!(config.timeouts.image(), Duration::from_secs(30));

        let names: Vec<_> = config.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["pixiv", "hitokoto", "sjsc", "djt", "tgrj"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_commands_table() {
        let toml_str = r#"
            log_level = "debug"
            base_dir = "/srv/bot"

            [timeouts]
            image_secs = 10

            [[commands]]
            name = "cats"
            description = "random cat"
            type = "image"
            source = "/srv/cats"

            [[commands]]
            name = "jokes"
            type = "text"
            source = "https://example.com/jokes.json"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.base_dir, Some(PathBuf::from("/srv/bot")));
        assert_eq!(config.timeouts.image_secs, 10);
        assert_eq!(config.timeouts.citation_secs, 3);
        assert_eq!(config.commands.len(), 2);
        assert_eq!(config.commands[1].kind, ContentKind::Text);
        assert_eq!(config.commands[1].description, "");
    }

    #[test]
    fn test_missing_commands_use_defaults() {
        let config: AppConfig = toml::from_str("log_level = \"warn\"").unwrap();
        assert_eq!(config.commands, default_commands());
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let toml_str = r#"
            [[commands]]
            name = "cats"
            type = "image"
        "#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = AppConfig::default();
        config
            .commands
            .push(CommandDefinition::new("djt", "", ContentKind::Text, "x.json"));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate command name 'djt'"));
    }

    #[test_case(" djt" ; "leading space")]
    #[test_case("djt " ; "trailing space")]
    #[test_case("d jt" ; "inner space")]
    #[test_case("djt\t" ; "trailing tab")]
    fn test_validate_rejects_whitespace(name: &str) {
        let mut config = AppConfig::default();
        config.commands = vec![CommandDefinition::new(name, "", ContentKind::Text, "x.json")];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contains whitespace"));
    }

    #[test_case("../../x" ; "parent traversal")]
    #[test_case("a/b" ; "slash")]
    #[test_case("a\\b" ; "backslash")]
    #[test_case("." ; "current dir")]
    #[test_case(".." ; "parent dir")]
    fn test_validate_rejects_path_like_names(name: &str) {
        let mut config = AppConfig::default();
        config.commands = vec![CommandDefinition::new(name, "", ContentKind::Text, "x.json")];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("is not a valid file name"));
    }

    #[test]
    fn test_validate_accepts_dotted_names() {
        let mut config = AppConfig::default();
        config.commands = vec![CommandDefinition::new("a..b", "", ContentKind::Text, "x")];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut config = AppConfig::default();
        config.commands = vec![CommandDefinition::new("  ", "", ContentKind::Text, "x")];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            log_level: Some(LogLevel::Trace),
            base_dir: Some(PathBuf::from("/tmp/bot")),
            ..CliArgs::default()
        };

        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.effective_base_dir(), PathBuf::from("/tmp/bot"));
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
