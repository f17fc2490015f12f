/*!
 * Common test utilities for the lyrict test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use lyrict::Config;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small LRC document exercising tags, repeated runs, inline marks and bare text
pub const SAMPLE_LRC: &str = "[ar:Test Artist]
[ti:Test Song]
[la:en]
[offset:+0]
[00:01.00]First line
[00:05.50][00:20.50]Chorus <00:06.00>line
Bare text line
[00:10.123]Third line
";

/// Creates a sample LRC file for testing
pub fn create_test_lrc(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_LRC)
}

/// Default configuration with result logs written to `log_dir`
pub fn test_config(log_dir: &Path) -> Config {
    let mut config = Config::default();
    config.report.log_path = log_dir.to_path_buf();
    config.concurrent_files = 2;
    config
}

/// Route `log` output through env_logger so `RUST_LOG=debug` shows it in test runs
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
