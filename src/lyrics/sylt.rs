/*!
 * Bridge between free-form LRC text and strict tick-lists.
 *
 * Synchronized-lyrics tags (ID3 SYLT) store plain `(milliseconds, text)`
 * pairs. Going from LRC to a tick-list keeps only each line's leading
 * timestamps; lines without one cannot be represented and are handed back
 * as `DroppedLine`s. Going the other way renders every entry with the
 * default `[mm:ss.xxx]` format.
 */

use std::borrow::Cow;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::LyricsError;
use crate::language_utils;
use crate::lyrics::anomaly::DroppedLine;
use crate::lyrics::line::LyricLine;
use crate::lyrics::metadata::{self, LANGUAGE_SCAN_LINES};
use crate::timestamp::{Tick, render_tick};

/// One entry of a strict tick-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedEntry {
    pub tick: Tick,
    pub text: String,
}

impl SyncedEntry {
    pub fn new(tick: impl Into<Tick>, text: impl Into<String>) -> Self {
        Self {
            tick: tick.into(),
            text: text.into(),
        }
    }
}

/// Result of converting LRC lines to a tick-list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyltConversion {
    /// Language from a `[la:]` tag, as written
    pub language: Option<String>,
    /// Offset that was applied to every tick
    pub offset_ms: i64,
    /// Entries in ascending tick order
    pub entries: Vec<SyncedEntry>,
    /// Lines that had no leading timestamp
    pub dropped: Vec<DroppedLine>,
}

/// Convert LRC lines to synced entries
///
/// A line with N leading timestamps becomes N entries sharing its text.
/// Inline timestamps stay in the text. `[offset:]` lines and `[la:]` lines
/// within the language scan window are consumed; every other line without a
/// leading timestamp, blank ones included, is reported in `dropped`. The
/// offset (the override if given, else the file's `[offset:]` tag) is added
/// to every tick, clamping at zero.
pub fn to_synced_entries<S: AsRef<str>>(lines: &[S], offset_override: Option<i64>) -> SyltConversion {
    let offset_ms = offset_override
        .or_else(|| metadata::find_offset(lines.iter().map(|l| l.as_ref())))
        .unwrap_or(0);
    let language = metadata::find_language(lines.iter().map(|l| l.as_ref()));

    let mut entries = Vec::new();
    let mut dropped = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        if metadata::is_offset_tag(raw) || (index < LANGUAGE_SCAN_LINES && metadata::is_language_tag(raw)) {
            continue;
        }

        let line = LyricLine::parse(raw);
        if !line.is_synced() {
            debug!("Line {} has no leading timestamp: {}", index + 1, raw);
            dropped.push(DroppedLine {
                line_number: index + 1,
                text: raw.to_string(),
            });
            continue;
        }

        let text = line.text();
        for timecode in &line.leading {
            entries.push(SyncedEntry {
                tick: timecode.to_ticks().offset_by(offset_ms),
                text: text.to_string(),
            });
        }
    }

    // Stable, so entries sharing a tick keep their input order
    entries.sort_by_key(|entry| entry.tick);

    if !dropped.is_empty() {
        warn!("{} line(s) without a leading timestamp omitted from tick-list", dropped.len());
    }

    SyltConversion {
        language,
        offset_ms,
        entries,
        dropped,
    }
}

/// Convert a whole LRC document to synced entries
pub fn lrc_to_synced_entries(text: &str, offset_override: Option<i64>) -> SyltConversion {
    let lines: Vec<&str> = text.lines().collect();
    to_synced_entries(&lines, offset_override)
}

/// Convert synced entries back to LRC lines
///
/// Entries are ordered by tick (ties keep input order). When a language is
/// given it is written first as a `[la:]` tag. Line breaks inside an entry's
/// text become single spaces so every entry stays on its own timestamped line.
pub fn from_synced_entries(entries: &[SyncedEntry], language: Option<&str>) -> Vec<String> {
    let mut ordered: Vec<&SyncedEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.tick);

    let mut lines = Vec::with_capacity(ordered.len() + 1);
    if let Some(code) = language.filter(|c| !c.trim().is_empty()) {
        lines.push(format!("[la:{}]", code.trim()));
    }
    lines.extend(
        ordered
            .into_iter()
            .map(|entry| format!("{}{}", render_tick(entry.tick), single_line(&entry.text))),
    );
    lines
}

fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(
            text.split(['\n', '\r'])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Convert synced entries to an LRC document
pub fn synced_entries_to_lrc(entries: &[SyncedEntry], language: Option<&str>) -> String {
    from_synced_entries(entries, language).join("\n")
}

// @struct: Decoded tick-list as exchanged with tag readers and writers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyltDocument {
    // @field: ISO 639-2 language code of the frame
    pub language: String,

    // @field: Entries in ascending tick order
    pub entries: Vec<SyncedEntry>,
}

impl SyltDocument {
    /// Decode a document; a non-empty language must be a valid ISO 639 code
    pub fn from_json(json: &str) -> Result<Self, LyricsError> {
        let mut document: SyltDocument = serde_json::from_str(json)?;
        if !document.language.trim().is_empty() {
            document.language = language_utils::normalize_to_part2t(&document.language)
                .map_err(|_| LyricsError::Language(document.language.clone()))?;
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, LyricsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the document as LRC text with its language tag
    pub fn to_lrc(&self) -> String {
        synced_entries_to_lrc(&self.entries, Some(&self.language))
    }
}
