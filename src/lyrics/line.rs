use std::ops::Range;

use crate::timestamp::{Delimiter, Timecode, scan};

// @module: Splitting a lyric line into its timestamp anchors and text

// @struct: A lyric line broken into leading run, inline marks and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine<'a> {
    // @field: Square timecodes at the start of the line, only whitespace between them
    pub leading: Vec<Timecode>,

    // @field: Every other timecode, with its byte span in the original line
    pub inline: Vec<(Timecode, Range<usize>)>,

    // @field: Everything after the leading run, untouched
    pub body: &'a str,
}

impl<'a> LyricLine<'a> {
    /// Classify a raw line
    ///
    /// More than one leading timecode makes a repeated-timestamp run: the
    /// same text shown at several times. A line with no leading timecode is a
    /// bare text line.
    pub fn parse(line: &'a str) -> Self {
        let mut leading = Vec::new();
        let mut inline = Vec::new();
        let mut anchor_end = line.len() - line.trim_start().len();
        let mut in_leading_run = true;

        for (timecode, span) in scan(line) {
            if in_leading_run
                && timecode.delimiter == Delimiter::Square
                && line[anchor_end..span.start].trim().is_empty()
            {
                leading.push(timecode);
                anchor_end = span.end;
            } else {
                in_leading_run = false;
                inline.push((timecode, span));
            }
        }

        let body = if leading.is_empty() { line } else { &line[anchor_end..] };

        LyricLine { leading, inline, body }
    }

    /// Whether the line carries at least one leading anchor
    pub fn is_synced(&self) -> bool {
        !self.leading.is_empty()
    }

    /// Whether the leading run has more than one timecode
    pub fn is_repeated(&self) -> bool {
        self.leading.len() > 1
    }

    /// Text shared by the leading run, surrounding whitespace removed
    pub fn text(&self) -> &'a str {
        self.body.trim()
    }
}
