//! Command-line arguments.

use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments, merged over the configuration file.
#[derive(Debug, Default, Parser)]
#[command(
    name = "randcontent",
    version,
    about = "Random images, quotes and text snippets on command",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the `data/content` list cache.
    #[arg(long, value_name = "PATH", env = "RANDCONTENT_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// List the registered commands and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Read commands line by line from standard input.
    #[arg(long, conflicts_with = "command")]
    pub stdin: bool,

    /// Command to run, e.g. `hitokoto` or `content pixiv`.
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
