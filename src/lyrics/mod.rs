/*!
 * Lyric document processing built on top of `timestamp`.
 *
 * - `line`: splits a line into leading timestamps, inline marks and text
 * - `standardize`: rewrites timestamps in free-form lyrics
 * - `sylt`: converts between LRC text and strict tick-lists
 * - `metadata`: offset/language tags and header rewriting
 * - `anomaly`: non-fatal issues reported by the conversions
 */

// Re-export main types for easier usage
pub use self::anomaly::{Anomaly, DroppedLine};
pub use self::line::LyricLine;
pub use self::metadata::{SongTags, find_language, find_offset, rewrite_header};
pub use self::standardize::{
    StandardizedLine, StandardizedLyrics, TimestampStyle, find_malformed_brackets, standardize_line, standardize_lyrics,
};
pub use self::sylt::{
    SyltConversion, SyltDocument, SyncedEntry, from_synced_entries, lrc_to_synced_entries,
    synced_entries_to_lrc, to_synced_entries,
};

// Submodules
pub mod anomaly;
pub mod line;
pub mod metadata;
pub mod standardize;
pub mod sylt;
