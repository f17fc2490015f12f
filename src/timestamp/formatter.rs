use std::fmt;

use crate::timestamp::parser::{Fraction, Timecode};
use crate::timestamp::ticks::{FormatPolicy, Tick, from_ticks};

// @module: Text rendering for timecodes and song lengths

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.delimiter.open())?;
        if let Some(hours) = self.hours {
            write!(f, "{:02}:", hours)?;
        }
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)?;
        match self.fraction {
            Fraction::None => {}
            Fraction::Centis(value) => write!(f, ".{:02}", value)?,
            Fraction::Millis(value) => write!(f, ".{:03}", value)?,
        }
        write!(f, "{}", self.delimiter.close())
    }
}

/// Render a timecode with zero-padded fields and its own fraction width
pub fn render(timecode: &Timecode) -> String {
    timecode.to_string()
}

/// Render a tick that has no source text: `[mm:ss.xxx]` or `[hh:mm:ss.xxx]`
pub fn render_tick(tick: Tick) -> String {
    render(&from_ticks(tick, FormatPolicy::fresh()))
}

/// Format a song duration for the `[length:]` tag as `mm:ss` or `hh:mm:ss`
pub fn format_length(ms: u64) -> String {
    let total_seconds = ms / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
