/*!
 * Error types for the lyrict application.
 *
 * The conversion core never fails on lyric content: anomalies such as
 * dropped lines travel as data (see `lyrics::anomaly`). The types here cover
 * the genuinely fallible edges: strict timecode parsing, tick-list documents,
 * configuration and file access.
 */

use thiserror::Error;

/// Errors raised when a string is required to be exactly one timecode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The input is not one of the recognized bracketed shapes
    #[error("Unrecognized timecode: {0}")]
    Unrecognized(String),
}

/// Errors that can occur when handling lyric documents
#[derive(Error, Debug)]
pub enum LyricsError {
    /// A tick-list document could not be decoded or encoded
    #[error("Invalid tick-list document: {0}")]
    InvalidDocument(String),

    /// A language code is not a valid ISO 639 code
    #[error("Invalid language code: {0}")]
    Language(String),
}

impl From<serde_json::Error> for LyricsError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidDocument(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from lyric processing
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),
}

// Utility functions for error conversion
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
