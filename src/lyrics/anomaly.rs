/*!
 * Non-fatal anomalies found while converting lyrics.
 *
 * Nothing in the conversion core aborts on odd input. Whatever could not be
 * carried over losslessly is returned to the caller as one of these values
 * so it can be logged or counted.
 */

use std::fmt;

/// A line that could not become a synced entry because it has no leading timecode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    /// The line exactly as it appeared
    pub text: String,
}

impl fmt::Display for DroppedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.line_number, self.text)
    }
}

/// Anomalies reported by the conversion functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Bracketed content that is neither a timecode nor a known tag; left as text
    MalformedBracket {
        line_number: usize,
        content: String,
    },
    /// Line without a leading timecode, omitted from a tick-list
    UnrepresentableLine(DroppedLine),
    /// Sub-second precision dropped while re-rendering a timecode
    PrecisionLoss {
        line_number: usize,
        original: String,
        rendered: String,
        dropped_ms: u64,
    },
    /// Timecode whose corrected value no longer fits the timecode text form; kept as written
    OutOfRange {
        line_number: usize,
        original: String,
    },
}

impl Anomaly {
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedBracket { line_number, .. } => *line_number,
            Self::UnrepresentableLine(dropped) => dropped.line_number,
            Self::PrecisionLoss { line_number, .. } => *line_number,
            Self::OutOfRange { line_number, .. } => *line_number,
        }
    }
}

impl From<DroppedLine> for Anomaly {
    fn from(dropped: DroppedLine) -> Self {
        Self::UnrepresentableLine(dropped)
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBracket { line_number, content } => {
                write!(f, "line {}: unrecognized bracket [{}] kept as text", line_number, content)
            }
            Self::UnrepresentableLine(dropped) => {
                write!(f, "line {}: no leading timestamp, omitted: {}", dropped.line_number, dropped.text)
            }
            Self::PrecisionLoss { line_number, original, rendered, dropped_ms } => {
                write!(
                    f,
                    "line {}: {} rendered as {} ({}ms dropped)",
                    line_number, original, rendered, dropped_ms
                )
            }
            Self::OutOfRange { line_number, original } => {
                write!(f, "line {}: {} is too large to rewrite, kept as written", line_number, original)
            }
        }
    }
}
