//! Time-of-day values for work schedules
//!
//! Intervals are half-open (`[start, end)`) and never wrap past midnight;
//! an overnight shift is expressed as two intervals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{ActorError, Result};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(ActorError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Build from a minute count; values past the end of the day are rejected
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ActorError::InvalidTime {
                hour: (minutes / 60).min(u8::MAX as u16) as u8,
                minute: (minutes % 60) as u8,
            });
        }
        Ok(Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ActorError;

    /// Parses `HH:MM`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ActorError::InvalidConfig(format!("expected HH:MM, got '{}'", s));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ActorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// One work shift: start inclusive, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ActorError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(ActorError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Positional constructor: `(start_hour, start_minute, end_hour, end_minute)`
    pub fn from_hm(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> Result<Self> {
        Self::new(
            TimeOfDay::new(start_hour, start_minute)?,
            TimeOfDay::new(end_hour, end_minute)?,
        )
    }

    /// Compile-time checked interval for constants; invalid input fails the build
    /// when used in a `const` item
    pub const fn literal(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> Self {
        assert!(start_hour < 24 && start_minute < 60, "invalid start time");
        assert!(end_hour < 24 && end_minute < 60, "invalid end time");
        assert!(
            (start_hour as u16) * 60 + (start_minute as u16) < (end_hour as u16) * 60 + (end_minute as u16),
            "interval must start before it ends"
        );
        Self {
            start: TimeOfDay {
                hour: start_hour,
                minute: start_minute,
            },
            end: TimeOfDay {
                hour: end_hour,
                minute: end_minute,
            },
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes_since_midnight() - self.start.minutes_since_midnight()
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }

    /// Touching intervals (one ends where the other starts) do not overlap
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
