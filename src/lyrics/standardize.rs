/*!
 * Timestamp standardization for free-form synced lyrics.
 *
 * Every timecode in a line is converted to ticks and rendered back with the
 * policy of the timecode it came from. That fixes malformed values such as
 * `[00:75.00]` or `[62:00.000]` while keeping the precision the file was
 * written with. A `TimestampStyle` can force a fraction width instead.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lyrics::anomaly::Anomaly;
use crate::lyrics::metadata;
use crate::timestamp::{Delimiter, FormatPolicy, FractionDigits, Timecode, dropped_millis, from_ticks, scan};

static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

/// How fraction widths are chosen when re-rendering timecodes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampStyle {
    /// Keep each timecode's own width (`[mm:ss]`, `[mm:ss.xx]` or `[mm:ss.xxx]`)
    #[default]
    Keep,
    /// Force two digits, `[mm:ss.xx]`
    Centis,
    /// Force three digits, `[mm:ss.xxx]`
    Millis,
}

impl TimestampStyle {
    /// Apply the style on top of a timecode's own policy
    pub fn apply(self, policy: FormatPolicy) -> FormatPolicy {
        match self {
            Self::Keep => policy,
            Self::Centis => policy.with_fraction(FractionDigits::Two),
            Self::Millis => policy.with_fraction(FractionDigits::Three),
        }
    }
}

/// One timecode whose re-rendered form lost sub-second precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionLoss {
    pub original: Timecode,
    pub rendered: Timecode,
    pub dropped_ms: u64,
}

/// Result of standardizing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedLine {
    pub text: String,
    pub precision_losses: Vec<PrecisionLoss>,
    /// Timecodes left as written because their corrected form is too large
    pub out_of_range: Vec<Timecode>,
}

/// Result of standardizing a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizedLyrics {
    pub text: String,
    pub anomalies: Vec<Anomaly>,
}

impl StandardizedLyrics {
    /// Whether standardization changed anything
    pub fn differs_from(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrite every timecode in a line
///
/// Leading, repeated and inline timecodes are all re-rendered. Whitespace
/// right after a square timecode is removed; all other text is copied as is.
/// A timecode whose corrected form would not parse again (such as
/// `[99:99:99]`, which becomes 100 hours) is kept as written and listed in
/// `out_of_range`. Running the result through again yields the same text.
pub fn standardize_line(line: &str, style: TimestampStyle) -> StandardizedLine {
    let mut text = String::with_capacity(line.len());
    let mut precision_losses = Vec::new();
    let mut out_of_range = Vec::new();
    let mut cursor = 0;

    for (original, span) in scan(line) {
        text.push_str(&line[cursor..span.start]);

        let policy = style.apply(original.policy());
        let tick = original.to_ticks();
        let rendered = from_ticks(tick, policy);
        if rendered.is_renderable() {
            text.push_str(&rendered.to_string());

            let dropped_ms = dropped_millis(tick, policy);
            if dropped_ms > 0 {
                precision_losses.push(PrecisionLoss { original, rendered, dropped_ms });
            }
        } else {
            text.push_str(&line[span.clone()]);
            out_of_range.push(original);
        }

        cursor = span.end;
        if original.delimiter == Delimiter::Square {
            let rest = &line[cursor..];
            cursor += rest.len() - rest.trim_start().len();
        }
    }

    text.push_str(&line[cursor..]);
    StandardizedLine {
        text,
        precision_losses,
        out_of_range,
    }
}

/// Standardize every line of a lyrics document
///
/// Line endings become `\n`, runs of empty lines collapse to one, and a
/// trailing newline is kept if the input had one. Brackets that are neither
/// timecodes nor ID tags are reported as `MalformedBracket` and left alone.
pub fn standardize_lyrics(text: &str, style: TimestampStyle) -> StandardizedLyrics {
    let mut lines: Vec<String> = Vec::new();
    let mut anomalies = Vec::new();
    let mut previous_empty = false;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if line.is_empty() {
            if !previous_empty {
                lines.push(String::new());
            }
            previous_empty = true;
            continue;
        }
        previous_empty = false;

        anomalies.extend(malformed_brackets(line_number, line));

        let standardized = standardize_line(line, style);
        for loss in standardized.precision_losses {
            debug!(
                "Line {}: {} rendered as {}, {}ms dropped",
                line_number, loss.original, loss.rendered, loss.dropped_ms
            );
            anomalies.push(Anomaly::PrecisionLoss {
                line_number,
                original: loss.original.to_string(),
                rendered: loss.rendered.to_string(),
                dropped_ms: loss.dropped_ms,
            });
        }
        anomalies.extend(standardized.out_of_range.into_iter().map(|original| {
            warn!("Line {}: {} is too large to rewrite", line_number, original);
            Anomaly::OutOfRange {
                line_number,
                original: original.to_string(),
            }
        }));
        lines.push(standardized.text);
    }

    let mut result = lines.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }

    StandardizedLyrics { text: result, anomalies }
}

/// Report unknown brackets in every line of a document, numbered as in `text`
pub fn find_malformed_brackets(text: &str) -> Vec<Anomaly> {
    text.lines()
        .enumerate()
        .flat_map(|(index, line)| malformed_brackets(index + 1, line))
        .collect()
}

fn malformed_brackets(line_number: usize, line: &str) -> Vec<Anomaly> {
    if metadata::is_id_tag(line) {
        return Vec::new();
    }
    BRACKET_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?.as_str();
            let content = caps.get(1)?.as_str();
            if content.trim().is_empty() || whole.parse::<Timecode>().is_ok() || metadata::is_id_tag(whole) {
                None
            } else {
                Some(Anomaly::MalformedBracket {
                    line_number,
                    content: content.to_string(),
                })
            }
        })
        .collect()
}
