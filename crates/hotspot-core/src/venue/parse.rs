//! Parsers for the time and day fields of a venue rule.
//!
//! Times are wall-clock "HH:MM" strings with minute precision. Day fields
//! are "Start-End" ranges of three-letter weekday abbreviations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Weekday index, 0 = Monday .. 6 = Sunday.
pub type WeekdayIndex = u8;

/// Abbreviations indexed by [`WeekdayIndex`].
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A wall-clock time of day stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, 00:00.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from hour and minute; `None` if either is out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn minute_of_day(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse an "HH:MM" string.
///
/// "24:00" is accepted as an alias for "00:00" so that a range can end
/// exactly at midnight. Either component may be one or two digits. Any
/// other hour of 24 or more, minute of 60 or more, non-digit character, or
/// missing colon is a [`FormatError`].
pub fn parse_time(text: &str) -> Result<TimeOfDay, FormatError> {
    let text = text.trim();
    if text == "24:00" {
        return Ok(TimeOfDay::MIDNIGHT);
    }

    let invalid = |reason: &str| FormatError::InvalidTime {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    let (hour, minute) = text.split_once(':').ok_or_else(|| invalid("missing ':'"))?;
    if !(1..=2).contains(&hour.len()) || !(1..=2).contains(&minute.len()) {
        return Err(invalid("expected HH:MM"));
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("non-numeric component"));
    }

    // Both components are at most two ASCII digits, so these cannot overflow.
    let hour: u8 = hour.parse().map_err(|_| invalid("non-numeric hour"))?;
    let minute: u8 = minute.parse().map_err(|_| invalid("non-numeric minute"))?;

    TimeOfDay::from_hm(hour, minute).ok_or_else(|| invalid("hour or minute out of range"))
}

/// Look up a three-letter weekday abbreviation (case-sensitive, "Mon".."Sun").
pub fn weekday_index(abbreviation: &str) -> Option<WeekdayIndex> {
    WEEKDAY_ABBREVIATIONS
        .iter()
        .position(|day| *day == abbreviation)
        .map(|i| i as WeekdayIndex)
}

/// Parse a "Start-End" day range into a set of weekday indices.
///
/// A forward range **excludes** its end day: "Mon-Fri" is Monday through
/// Thursday. A range whose start comes after its end wraps through Sunday
/// and keeps its end day: "Sat-Mon" is {Sat, Sun, Mon} and "Sun-Sat" is
/// the whole week.
///
/// Strings without a '-' or with unknown abbreviations give an empty set.
pub fn parse_day_range(text: &str) -> BTreeSet<WeekdayIndex> {
    let Some((start, end)) = text.trim().split_once('-') else {
        return BTreeSet::new();
    };
    let (Some(start), Some(end)) = (weekday_index(start.trim()), weekday_index(end.trim())) else {
        return BTreeSet::new();
    };

    if start <= end {
        (start..end).collect()
    } else {
        (start..7).chain(0..=end).collect()
    }
}

/// Like [`parse_day_range`], but reports why a string was rejected.
///
/// Used at the ingestion boundary so malformed day fields can be logged
/// with a reason. The resulting set is identical to `parse_day_range`.
pub fn try_parse_day_range(text: &str) -> Result<BTreeSet<WeekdayIndex>, FormatError> {
    let (start, end) = text
        .trim()
        .split_once('-')
        .ok_or_else(|| FormatError::UnknownWeekday(text.trim().to_string()))?;
    for day in [start.trim(), end.trim()] {
        if weekday_index(day).is_none() {
            return Err(FormatError::UnknownWeekday(day.to_string()));
        }
    }
    Ok(parse_day_range(text))
}
