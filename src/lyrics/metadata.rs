/*!
 * LRC ID tags: offset and language extraction, header rewriting.
 *
 * ID tags are whole lines of the form `[key:value]`. `offset` and `la` are
 * control tags that steer conversion; the rest (`ar`, `ti`, ...) only
 * describe the song.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::timestamp::format_length;

/// Only this many leading lines are searched for a `[la:]` tag
pub const LANGUAGE_SCAN_LINES: usize = 20;

static OFFSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[offset:\s*([+-]?\d+)\s*\]$").unwrap()
});

static LANGUAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[la:\s*(\w{2,3})\s*\]$").unwrap()
});

static ID_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[(ar|al|ti|au|length|la|offset|by|re|tool|ve):\s*(.*?)\s*\]$").unwrap()
});

/// Find the first `[offset:+N]` / `[offset:-N]` tag, in milliseconds
pub fn find_offset<I, S>(lines: I) -> Option<i64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().find_map(|line| parse_offset(line.as_ref()))
}

/// Find the first `[la:code]` tag within the first [`LANGUAGE_SCAN_LINES`] lines
pub fn find_language<I, S>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .take(LANGUAGE_SCAN_LINES)
        .find_map(|line| parse_language(line.as_ref()))
}

// Values past the i64 range saturate, so the first tag still wins
fn parse_offset(line: &str) -> Option<i64> {
    let caps = OFFSET_REGEX.captures(line.trim())?;
    let value = caps.get(1)?.as_str();
    Some(value.parse().unwrap_or(if value.starts_with('-') { i64::MIN } else { i64::MAX }))
}

fn parse_language(line: &str) -> Option<String> {
    LANGUAGE_REGEX
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether a line is a well-formed `[offset:]` tag
pub fn is_offset_tag(line: &str) -> bool {
    parse_offset(line).is_some()
}

/// Whether a line is a well-formed `[la:]` tag
pub fn is_language_tag(line: &str) -> bool {
    parse_language(line).is_some()
}

/// Whether a line is any recognized LRC ID tag
pub fn is_id_tag(line: &str) -> bool {
    header_tag(line).is_some()
}

/// LRC header tags in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderTag {
    Artist,
    Album,
    Title,
    Author,
    Length,
    Language,
    Offset,
    LrcAuthor,
    Creator,
    Version,
}

impl HeaderTag {
    pub const ALL: [HeaderTag; 10] = [
        Self::Artist,
        Self::Album,
        Self::Title,
        Self::Author,
        Self::Length,
        Self::Language,
        Self::Offset,
        Self::LrcAuthor,
        Self::Creator,
        Self::Version,
    ];

    /// Key written in the rebuilt header
    pub fn key(self) -> &'static str {
        match self {
            Self::Artist => "ar",
            Self::Album => "al",
            Self::Title => "ti",
            Self::Author => "au",
            Self::Length => "length",
            Self::Language => "la",
            Self::Offset => "offset",
            Self::LrcAuthor => "by",
            Self::Creator => "re",
            Self::Version => "ve",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "ar" => Some(Self::Artist),
            "al" => Some(Self::Album),
            "ti" => Some(Self::Title),
            "au" => Some(Self::Author),
            "length" => Some(Self::Length),
            "la" => Some(Self::Language),
            "offset" => Some(Self::Offset),
            "by" => Some(Self::LrcAuthor),
            "re" | "tool" => Some(Self::Creator),
            "ve" => Some(Self::Version),
            _ => None,
        }
    }
}

fn header_tag(line: &str) -> Option<(HeaderTag, String)> {
    let trimmed = line.trim();
    let caps = ID_TAG_REGEX.captures(trimmed)?;
    let tag = HeaderTag::from_key(caps.get(1)?.as_str())?;
    let value = caps.get(2)?.as_str().to_string();

    // la and offset only count when their value is well-formed
    match tag {
        HeaderTag::Language if parse_language(trimmed).is_none() => None,
        HeaderTag::Offset if parse_offset(trimmed).is_none() => None,
        _ => Some((tag, value)),
    }
}

/// Tags of the audio file a lyrics file belongs to, as read by a tag reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub composer: Option<String>,
    pub lyricist: Option<String>,
    /// Song duration in milliseconds
    pub length_ms: Option<u64>,
}

/// Rebuild the ID tag header of an LRC document
///
/// Existing ID tag lines are removed wherever they appear; the first value of
/// each is kept. Song tags take precedence over the file's own values, except
/// for the author, which prefers the lyricist, then the file's `[au:]`, then
/// the composer. The body follows the header with surrounding blank lines
/// trimmed.
pub fn rewrite_header(text: &str, tags: &SongTags) -> String {
    let mut extracted: Vec<Option<String>> = vec![None; HeaderTag::ALL.len()];
    let mut body = Vec::new();

    for line in text.lines() {
        match header_tag(line) {
            Some((tag, value)) => {
                let slot = &mut extracted[tag as usize];
                if slot.is_none() {
                    *slot = Some(value);
                }
            }
            None => body.push(line),
        }
    }

    let mut header = Vec::new();
    for tag in HeaderTag::ALL {
        let from_file = extracted[tag as usize].clone();
        let value = match tag {
            HeaderTag::Artist => tags.artist.clone().or(from_file),
            HeaderTag::Album => tags.album.clone().or(from_file),
            HeaderTag::Title => tags.title.clone().or(from_file),
            HeaderTag::Author => tags.lyricist.clone().or(from_file).or_else(|| tags.composer.clone()),
            HeaderTag::Length => tags.length_ms.map(format_length).or(from_file),
            _ => from_file,
        };
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            header.push(format!("[{}:{}]", tag.key(), value));
        }
    }

    let body = body.join("\n");
    let body = body.trim();
    if header.is_empty() {
        body.to_string()
    } else if body.is_empty() {
        header.join("\n")
    } else {
        format!("{}\n{}", header.join("\n"), body)
    }
}
