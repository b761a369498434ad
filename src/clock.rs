//! Clock model shared by the countdown and stopwatch programs.
//!
//! A [`Clock`] holds a whole number of seconds and moves by exactly one
//! second per [`Clock::step`]. A countdown clock saturates at zero and
//! reports when it gets there; a count-up clock grows without bound.
//!
//! # Example
//!
//! ```rust
//! use termdesk::clock::{Clock, ClockFormat, Direction, Hms};
//!
//! let mut clock = Clock::new(Direction::Down, ClockFormat::HhMmSs);
//! clock.set(Hms::new(0, 0, 2));
//! assert!(!clock.step());
//! assert!(clock.step()); // reached zero
//! assert_eq!(clock.format(), "00:00:00");
//! ```

use crate::error::ClockError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized hours/minutes/seconds triple.
///
/// Minutes and seconds are always in `0..=59`; hours are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hms {
    /// Whole hours.
    pub hours: u64,
    /// Minutes, `0..=59`.
    pub minutes: u64,
    /// Seconds, `0..=59`.
    pub seconds: u64,
}

impl Hms {
    /// The zero value.
    pub const ZERO: Hms = Hms {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Builds a value, carrying overflowing seconds and minutes upward.
    /// Saturates at `u64::MAX` seconds.
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self::from_secs(Self::checked_secs(hours, minutes, seconds).unwrap_or(u64::MAX))
    }

    /// Like [`Hms::new`], but `None` when the total does not fit in a
    /// `u64` second count.
    pub fn try_new(hours: u64, minutes: u64, seconds: u64) -> Option<Self> {
        Self::checked_secs(hours, minutes, seconds).map(Self::from_secs)
    }

    fn checked_secs(hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
        hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)
    }

    /// Splits a second count into its normalized parts.
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Total length in seconds.
    pub fn total_secs(&self) -> u64 {
        Self::checked_secs(self.hours, self.minutes, self.seconds).unwrap_or(u64::MAX)
    }

    /// Whether this is `00:00:00`.
    pub fn is_zero(&self) -> bool {
        self.total_secs() == 0
    }

    /// Renders the value in the given format.
    ///
    /// `MM:SS` folds hours into the minute field so that [`Hms::parse`]
    /// reads back the same value.
    pub fn format(&self, format: ClockFormat) -> String {
        match format {
            ClockFormat::HhMmSs => {
                format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
            }
            ClockFormat::MmSs => {
                let minutes = self.hours.saturating_mul(60).saturating_add(self.minutes);
                format!("{:02}:{:02}", minutes, self.seconds)
            }
        }
    }

    /// Reads `HH:MM:SS` or `MM:SS`.
    ///
    /// The leading field may be any size that still fits in a `u64` second
    /// count; the trailing ones must be in `0..=59`.
    pub fn parse(s: &str) -> Result<Self, ClockError> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        let numbers = fields
            .iter()
            .map(|f| {
                if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ClockError::Number((*f).to_string()));
                }
                f.parse::<u64>()
                    .map_err(|_| ClockError::Number((*f).to_string()))
            })
            .collect::<Result<Vec<u64>, _>>()?;

        let (hours, minutes, seconds) = match numbers.as_slice() {
            [h, m, s] => {
                check_range("minutes", *m)?;
                (*h, *m, *s)
            }
            [m, s] => (0, *m, *s),
            _ => return Err(ClockError::Shape(s.to_string())),
        };
        check_range("seconds", seconds)?;
        Self::try_new(hours, minutes, seconds).ok_or_else(|| ClockError::Overflow(s.to_string()))
    }
}

fn check_range(field: &'static str, value: u64) -> Result<(), ClockError> {
    if value > 59 {
        return Err(ClockError::Range { field, value });
    }
    Ok(())
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(ClockFormat::HhMmSs))
    }
}

/// How a clock value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `HH:MM:SS`
    #[default]
    #[serde(rename = "HH:MM:SS")]
    HhMmSs,
    /// `MM:SS`
    #[serde(rename = "MM:SS")]
    MmSs,
}

/// Which way a clock moves on each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Countdown: decrement, stop at zero.
    Down,
    /// Count-up: increment forever.
    Up,
}

/// The clock model driven by the tick driver.
#[derive(Debug, Clone)]
pub struct Clock {
    value: Hms,
    direction: Direction,
    format: ClockFormat,
}

impl Clock {
    /// A zeroed clock.
    pub fn new(direction: Direction, format: ClockFormat) -> Self {
        Self {
            value: Hms::ZERO,
            direction,
            format,
        }
    }

    /// Replaces the current value.
    ///
    /// Callers gate this on the run state; the clock itself does not know it.
    pub fn set(&mut self, value: Hms) {
        self.value = value;
    }

    /// Returns to zero.
    pub fn clear(&mut self) {
        self.value = Hms::ZERO;
    }

    /// Moves one second.
    ///
    /// For a countdown clock, returns `true` when this step reached zero.
    /// Stepping a countdown clock that is already at zero leaves it at zero
    /// and returns `true` again. A count-up clock always returns `false`.
    pub fn step(&mut self) -> bool {
        let total = self.value.total_secs();
        match self.direction {
            Direction::Down => {
                let next = total.saturating_sub(1);
                self.value = Hms::from_secs(next);
                next == 0
            }
            Direction::Up => {
                self.value = Hms::from_secs(total.saturating_add(1));
                false
            }
        }
    }

    /// The current value.
    pub fn value(&self) -> Hms {
        self.value
    }

    /// Whether the clock shows zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The step direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The display format.
    pub fn display_format(&self) -> ClockFormat {
        self.format
    }

    /// Renders the current value; a pure function of it.
    pub fn format(&self) -> String {
        self.value.format(self.format)
    }
}
