//! Command-line argument parsing for the daemon
//!
//! Supports:
//! - An alternate preferences file
//! - Overriding the identical-line skipping preference
//! - Reading input events from a script file instead of stdin
//! - Console-only logging

use clap::Parser;
use std::path::PathBuf;

use crate::config::Preferences;

/// Braille display command dispatch daemon
#[derive(Parser, Debug)]
#[command(name = "brld", version, about = "Braille display command dispatch daemon")]
pub struct CliArgs {
    /// Input script to read events from (defaults to stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Preferences file to use instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip identical lines when moving up and down
    #[arg(short = 's', long, conflicts_with = "no_skip_identical_lines")]
    pub skip_identical_lines: bool,

    /// Never skip identical lines, whatever the preferences say
    #[arg(long)]
    pub no_skip_identical_lines: bool,

    /// Log to the console only
    #[arg(long)]
    pub no_file_log: bool,
}

/// Where input events come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Script(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub input: InputSource,
    /// Preferences file; `None` means the default location
    pub config_path: Option<PathBuf>,
    /// Forced value for `skip_identical_lines`, if any
    pub skip_identical_lines: Option<bool>,
    pub file_logging: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let input = match self.input {
            Some(path) if path.is_dir() => {
                return Err(format!("Input is a directory: {}", path.display()));
            }
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::Script(path),
            None => InputSource::Stdin,
        };

        let skip_identical_lines = if self.skip_identical_lines {
            Some(true)
        } else if self.no_skip_identical_lines {
            Some(false)
        } else {
            None
        };

        Ok(StartupConfig {
            input,
            config_path: self.config,
            skip_identical_lines,
            file_logging: !self.no_file_log,
        })
    }
}

impl StartupConfig {
    /// Load preferences and apply command-line overrides
    pub fn preferences(&self) -> Preferences {
        let mut preferences = match &self.config_path {
            Some(path) => Preferences::load_from(path),
            None => Preferences::load(),
        };
        if let Some(skip) = self.skip_identical_lines {
            preferences.skip_identical_lines = skip;
        }
        preferences
    }
}
