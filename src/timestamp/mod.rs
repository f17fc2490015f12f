/*!
 * Timestamp handling for synced lyrics.
 *
 * This module turns bracketed LRC timecodes into canonical millisecond ticks
 * and back. It is split into three submodules:
 *
 * - `parser`: finds and classifies `[mm:ss.xx]`-style timecodes in a line
 * - `ticks`: converts timecodes to ticks and back under a `FormatPolicy`
 * - `formatter`: renders timecodes and song lengths as text
 */

// Re-export main types for easier usage
pub use self::formatter::{format_length, render, render_tick};
pub use self::parser::{Delimiter, Fraction, Timecode, scan};
pub use self::ticks::{FormatPolicy, FractionDigits, Tick, dropped_millis, from_ticks, to_ticks};

// Submodules
pub mod formatter;
pub mod parser;
pub mod ticks;
