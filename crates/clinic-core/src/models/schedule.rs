//! Calendar dates, clock times and appointment time windows.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use super::{ValidationError, ValidationResult};

/// Input and display format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Input and display format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// A calendar date (no time zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
    /// Parse a `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::Date(raw.to_string()))
    }

    /// Build a date from components, rejecting impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ValidationResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::Date(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub fn is_before(&self, other: &Date) -> bool {
        self.0 < other.0
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time(NaiveTime);

impl Time {
    /// Parse an `HH:MM` time.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::Time(raw.to_string()))
    }

    /// Build a time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> ValidationResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::Time(format!("{hour:02}:{minute:02}")))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for Time {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A half-open `[start, end)` window within one day.
///
/// # Invariants
/// - `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePeriod {
    start: Time,
    end: Time,
}

impl TimePeriod {
    /// Create a period, rejecting empty or inverted windows.
    pub fn new(start: Time, end: Time) -> ValidationResult<Self> {
        if start >= end {
            return Err(ValidationError::TimePeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse start and end from `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> ValidationResult<Self> {
        Self::new(Time::parse(start)?, Time::parse(end)?)
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    /// Half-open interval intersection: `start₁ < end₂ && start₂ < end₁`.
    pub fn overlaps(&self, other: &TimePeriod) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
