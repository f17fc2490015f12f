/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use lyrict::app_config::{Config, LogLevel};
use lyrict::lyrics::TimestampStyle;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.extensions, vec!["flac", "mp3"]);
    assert!(config.standardize);
    assert_eq!(config.timestamp_style, TimestampStyle::Keep);
    assert_eq!(config.default_language, "eng");
    assert_eq!(config.concurrent_files, 4);
    assert!(!config.overwrite);
    assert!(!config.report.log_to_disk);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.default_language = "zz".to_string();
    assert!(config.validate().is_err());
    config.default_language = "de".to_string();
    assert!(config.validate().is_ok());

    config.extensions.clear();
    assert!(config.validate().is_err());
    config.extensions = vec![" ".to_string()];
    assert!(config.validate().is_err());
    config.extensions = vec!["ogg".to_string()];

    config.concurrent_files = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_normalized_extensions_withDotsAndCase_shouldStripAndLowercase() {
    let config = Config {
        extensions: vec![".FLAC".to_string(), " mp3 ".to_string()],
        ..Config::default()
    };
    assert_eq!(config.normalized_extensions(), vec!["flac", "mp3"]);
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "timestamp_style": "millis", "report": { "log_to_disk": true } }"#)?;

    assert_eq!(config.timestamp_style, TimestampStyle::Millis);
    assert!(config.report.log_to_disk);
    assert!(!config.report.separate_logs);
    assert_eq!(config.extensions, vec!["flac", "mp3"]);
    assert!(config.standardize);
    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("lyrict.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let mut on_disk: Config = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(on_disk.concurrent_files, created.concurrent_files);

    on_disk.timestamp_style = TimestampStyle::Centis;
    std::fs::write(&path, serde_json::to_string_pretty(&on_disk)?)?;
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.timestamp_style, TimestampStyle::Centis);
    Ok(())
}

#[test]
fn test_load_or_create_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "lyrict.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_log_level_withConversion_shouldMapToLevelFilter() {
    assert_eq!(log::LevelFilter::from(&LogLevel::Debug), log::LevelFilter::Debug);
    assert_eq!(log::LevelFilter::from(&LogLevel::Error), log::LevelFilter::Error);
}
