/*!
 * # lyrict - LRC lyrics timestamp tool
 *
 * A Rust library for normalizing LRC timestamps and bridging free-form
 * synced lyrics to the strict `(milliseconds, text)` tick-lists stored in
 * synchronized-lyrics tags such as ID3 SYLT.
 *
 * ## Features
 *
 * - Parse `[mm:ss]`, `[mm:ss.xx]`, `[mm:ss.xxx]`, `[hh:mm:ss.xxx]` and inline `<mm:ss.xx>` timestamps
 * - Re-render malformed timestamps (`[00:75.00]`, `[62:00.000]`) while keeping each one's precision
 * - Convert LRC to tick-lists with `[offset:]` and `[la:]` support, reporting lines that cannot be carried over
 * - Convert tick-lists back to LRC
 * - Rebuild ID tag headers from song tags
 * - Match lyrics files to audio files and write result logs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: Timecode parsing, tick conversion and rendering
 * - `lyrics`: Line-level and document-level conversions:
 *   - `lyrics::standardize`: Timestamp standardization
 *   - `lyrics::sylt`: LRC to tick-list bridge
 *   - `lyrics::metadata`: Offset, language and header tags
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations and result logs
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod lyrics;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, LyricsError, TimestampError};
pub use language_utils::{get_language_name, normalize_to_part2t};
pub use lyrics::{SyncedEntry, TimestampStyle, lrc_to_synced_entries, standardize_lyrics, synced_entries_to_lrc};
pub use timestamp::{Tick, Timecode};
