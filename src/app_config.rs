use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::lyrics::TimestampStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Audio file extensions lyrics are matched against
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Rewrite timestamps when lyrics pass through a conversion
    #[serde(default = "default_true")]
    pub standardize: bool,

    /// Fraction width used when standardizing
    #[serde(default)]
    pub timestamp_style: TimestampStyle,

    /// Language for tick-lists whose source has no valid `[la:]` tag
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Number of files converted at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Only look at the given folder, not its subfolders
    #[serde(default)]
    pub single_folder: bool,

    /// Replace existing output files
    #[serde(default)]
    pub overwrite: bool,

    /// Show progress bars
    #[serde(default)]
    pub progress: bool,

    /// Result log settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where and how run results are written to disk
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportConfig {
    // @field: Write result logs at all
    #[serde(default)]
    pub log_to_disk: bool,

    // @field: One log file per result category instead of one per run
    #[serde(default)]
    pub separate_logs: bool,

    // @field: Directory the logs go to
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log_to_disk: false,
            separate_logs: false,
            log_path: default_log_path(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["flac".to_string(), "mp3".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    crate::language_utils::DEFAULT_FRAME_LANGUAGE.to_string()
}

fn default_concurrent_files() -> usize {
    4
}

fn default_log_path() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load the configuration at `path`, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _language_name = crate::language_utils::get_language_name(&self.default_language)
            .context("Invalid default_language")?;

        if self.extensions.is_empty() {
            return Err(anyhow!("At least one audio extension is required"));
        }

        if let Some(bad) = self.extensions.iter().find(|ext| ext.trim().is_empty() || ext.contains('/')) {
            return Err(anyhow!("Invalid audio extension: '{}'", bad));
        }

        if self.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        Ok(())
    }

    /// Extensions without leading dots, lowercased
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .collect()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extensions: default_extensions(),
            standardize: default_true(),
            timestamp_style: TimestampStyle::default(),
            default_language: default_language(),
            concurrent_files: default_concurrent_files(),
            single_folder: false,
            overwrite: false,
            progress: false,
            report: ReportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
