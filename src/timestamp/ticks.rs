/*!
 * Conversion between timecodes and canonical millisecond ticks.
 *
 * A `Tick` is the pivot every conversion goes through. Going back from a
 * tick to a timecode needs a `FormatPolicy`, which records how the original
 * timecode was written so the re-rendered text keeps its precision and
 * field layout.
 */

use serde::{Deserialize, Serialize};

use crate::timestamp::parser::{Delimiter, Fraction, Timecode};

const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// Canonical millisecond timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Shift by a signed offset, clamping at zero
    pub fn offset_by(self, offset_ms: i64) -> Tick {
        Tick(self.0.saturating_add_signed(offset_ms))
    }
}

impl From<u64> for Tick {
    fn from(ms: u64) -> Self {
        Tick(ms)
    }
}

/// Digit count used when rendering the sub-second part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FractionDigits {
    Zero,
    Two,
    Three,
}

impl From<Fraction> for FractionDigits {
    fn from(fraction: Fraction) -> Self {
        match fraction {
            Fraction::None => Self::Zero,
            Fraction::Centis(_) => Self::Two,
            Fraction::Millis(_) => Self::Three,
        }
    }
}

// @struct: Per-timecode rendering policy, computed at parse time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatPolicy {
    // @field: Source had an hour field, so hours are always rendered
    pub had_hours: bool,

    pub fraction: FractionDigits,

    pub delimiter: Delimiter,
}

impl FormatPolicy {
    /// Policy that reproduces the shape of `timecode`
    pub fn of(timecode: &Timecode) -> Self {
        Self {
            had_hours: timecode.had_hours(),
            fraction: timecode.fraction.into(),
            delimiter: timecode.delimiter,
        }
    }

    /// Policy for ticks that never had a textual form: `[mm:ss.xxx]`,
    /// with hours only from one hour on
    pub fn fresh() -> Self {
        Self {
            had_hours: false,
            fraction: FractionDigits::Three,
            delimiter: Delimiter::Square,
        }
    }

    pub fn with_fraction(self, fraction: FractionDigits) -> Self {
        Self { fraction, ..self }
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Convert a timecode to milliseconds
pub fn to_ticks(timecode: &Timecode) -> Tick {
    let hours = timecode.hours.unwrap_or(0);
    let minutes = hours * MINUTES_PER_HOUR + timecode.minutes;
    let seconds = minutes * SECONDS_PER_MINUTE + timecode.seconds;
    Tick(seconds * MS_PER_SECOND + timecode.fraction.as_millis())
}

/// Convert milliseconds back to a timecode shaped by `policy`
///
/// Hours are rendered when the source had them (even when zero) and, for
/// square timecodes, whenever the minutes would otherwise exceed 59. Inline
/// angle timecodes never gain hours; their minutes keep counting past 59 so
/// the text stays in a shape the parser accepts.
///
/// Sub-second precision the policy cannot hold is truncated. Under a
/// zero-digit policy the whole millisecond remainder is dropped on purpose:
/// a timecode written without a fraction is not given one. Use
/// [`dropped_millis`] to find out how much was lost.
///
/// Ticks from 100 hours on (1000 minutes for angle timecodes) produce a
/// timecode whose text the parser no longer accepts; check
/// [`Timecode::is_renderable`] before writing one out.
pub fn from_ticks(tick: Tick, policy: FormatPolicy) -> Timecode {
    let ms = tick.0 % MS_PER_SECOND;
    let total_seconds = tick.0 / MS_PER_SECOND;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    let total_minutes = total_seconds / SECONDS_PER_MINUTE;

    let promote = policy.delimiter == Delimiter::Square
        && (policy.had_hours || total_minutes >= MINUTES_PER_HOUR);
    let (hours, minutes) = if promote {
        (Some(total_minutes / MINUTES_PER_HOUR), total_minutes % MINUTES_PER_HOUR)
    } else {
        (None, total_minutes)
    };

    // Both casts are bounded by MS_PER_SECOND
    let fraction = match policy.fraction {
        FractionDigits::Zero => Fraction::None,
        FractionDigits::Two => Fraction::Centis((ms / 10) as u16),
        FractionDigits::Three => Fraction::Millis(ms as u16),
    };

    Timecode {
        hours,
        minutes,
        seconds,
        fraction,
        delimiter: policy.delimiter,
    }
}

/// Milliseconds that `from_ticks(tick, policy)` cannot represent
pub fn dropped_millis(tick: Tick, policy: FormatPolicy) -> u64 {
    match policy.fraction {
        FractionDigits::Zero => tick.0 % MS_PER_SECOND,
        FractionDigits::Two => tick.0 % 10,
        FractionDigits::Three => 0,
    }
}
