use std::ops::Range;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::TimestampError;
use crate::timestamp::ticks::{FormatPolicy, Tick, to_ticks};

// @module: Timecode recognition in lyric lines

// @const: Square timecodes may carry hours, angle (inline) timecodes may not
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[(?:(\d{1,2}):)?(\d{1,3}):(\d{1,2})(?:\.(\d{2,3}))?\]|<(\d{1,3}):(\d{1,2})(?:\.(\d{2,3}))?>",
    )
    .unwrap()
});

/// Bracket pair a timecode was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `[mm:ss.xx]`, used for line anchors and repeated runs
    Square,
    /// `<mm:ss.xx>`, used for inline (word-level) marks
    Angle,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Self::Square => '[',
            Self::Angle => '<',
        }
    }

    pub fn close(self) -> char {
        match self {
            Self::Square => ']',
            Self::Angle => '>',
        }
    }
}

/// Sub-second part of a timecode, keeping the digit count it was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fraction {
    /// No fraction in the source text
    None,
    /// Two digits, hundredths of a second
    Centis(u16),
    /// Three digits, milliseconds
    Millis(u16),
}

impl Fraction {
    /// Number of digits the fraction is rendered with
    pub fn digits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Centis(_) => 2,
            Self::Millis(_) => 3,
        }
    }

    /// Fraction normalized to milliseconds
    pub fn as_millis(self) -> u64 {
        match self {
            Self::None => 0,
            Self::Centis(value) => u64::from(value) * 10,
            Self::Millis(value) => u64::from(value),
        }
    }
}

// @struct: One bracketed timestamp occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timecode {
    // @field: Present only when the source text had an hour field
    pub hours: Option<u64>,

    // @field: May exceed 59 when hours are absent (hour overflow)
    pub minutes: u64,

    pub seconds: u64,

    pub fraction: Fraction,

    pub delimiter: Delimiter,
}

impl Timecode {
    /// Whether the source text carried an hour component
    pub fn had_hours(&self) -> bool {
        self.hours.is_some()
    }

    /// Rendering policy derived from the shape this timecode was written in
    pub fn policy(&self) -> FormatPolicy {
        FormatPolicy::of(self)
    }

    /// Canonical millisecond value
    pub fn to_ticks(&self) -> Tick {
        to_ticks(self)
    }

    /// Whether the rendered text fits the field widths `scan` accepts
    ///
    /// Hours take at most two digits and minutes at most three, so values
    /// from 100 hours (or 1000 inline minutes) on cannot be written back.
    pub fn is_renderable(&self) -> bool {
        self.hours.is_none_or(|hours| hours <= 99) && self.minutes <= 999 && self.seconds <= 99
    }

    fn from_captures(caps: &Captures) -> Option<Self> {
        let number = |idx: usize| -> Option<Option<u64>> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse::<u64>().ok().map(Some),
                None => Some(None),
            }
        };

        if caps.get(2).is_some() {
            Some(Self {
                hours: number(1)?,
                minutes: number(2)??,
                seconds: number(3)??,
                fraction: parse_fraction(caps.get(4).map(|m| m.as_str()))?,
                delimiter: Delimiter::Square,
            })
        } else {
            Some(Self {
                hours: None,
                minutes: number(5)??,
                seconds: number(6)??,
                fraction: parse_fraction(caps.get(7).map(|m| m.as_str()))?,
                delimiter: Delimiter::Angle,
            })
        }
    }
}

fn parse_fraction(digits: Option<&str>) -> Option<Fraction> {
    match digits {
        None => Some(Fraction::None),
        Some(d) if d.len() == 2 => d.parse().ok().map(Fraction::Centis),
        Some(d) if d.len() == 3 => d.parse().ok().map(Fraction::Millis),
        Some(_) => None,
    }
}

/// Scan a line for timecodes, left to right
///
/// The iterator is lazy and borrows the line; calling `scan` again restarts
/// from the beginning. Bracketed content that is not one of the recognized
/// shapes (`[offset:+100]`, `[Chorus]`, `[1:2:3:4]`) is skipped and stays
/// ordinary text.
pub fn scan(line: &str) -> impl Iterator<Item = (Timecode, Range<usize>)> + '_ {
    TIMECODE_REGEX.captures_iter(line).filter_map(|caps| {
        let whole = caps.get(0)?;
        Timecode::from_captures(&caps).map(|tc| (tc, whole.range()))
    })
}

impl FromStr for Timecode {
    type Err = TimestampError;

    /// Parse a string holding exactly one bracketed timecode
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut found = scan(trimmed);
        match found.next() {
            Some((tc, span)) if span == (0..trimmed.len()) => Ok(tc),
            _ => Err(TimestampError::Unrecognized(s.to_string())),
        }
    }
}
