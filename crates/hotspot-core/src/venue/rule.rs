//! Venue rules: loosely-typed rows as read from a table, and the validated
//! form the resolver evaluates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::parse::{parse_time, try_parse_day_range, TimeOfDay, WeekdayIndex, WEEKDAY_ABBREVIATIONS};
use crate::error::FormatError;

/// A rule row exactly as it appears in a rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRow {
    #[serde(default)]
    pub category_id: String,
    /// "HH:MM" or "24:00"
    #[serde(default)]
    pub start: String,
    /// "HH:MM" or "24:00"
    #[serde(default)]
    pub end: String,
    /// "Xxx-Xxx" weekday range
    #[serde(default)]
    pub days: String,
}

impl RuleRow {
    pub fn new(category_id: &str, start: &str, end: &str, days: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            days: days.to_string(),
        }
    }
}

/// A validated venue rule.
///
/// Window membership is decided on the hour only: a rule ending at
/// "14:30" matches all of hour 14, the same as one ending at "14:59".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRule {
    pub category_id: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub weekdays: BTreeSet<WeekdayIndex>,
}

impl VenueRule {
    /// True when the window runs past midnight (start hour after end hour).
    pub fn wraps_midnight(&self) -> bool {
        self.start.hour() > self.end.hour()
    }

    /// Whether `hour` falls inside the window, inclusive at both ends.
    pub fn covers_hour(&self, hour: u8) -> bool {
        let (start, end) = (self.start.hour(), self.end.hour());
        if self.wraps_midnight() {
            hour >= start || hour <= end
        } else {
            start <= hour && hour <= end
        }
    }

    /// Whether the rule matches the given hour and weekday.
    ///
    /// Besides the listed weekdays, a window that wraps midnight also
    /// covers the early hours (up to its end hour) of the day after each
    /// listed weekday: a Friday 22:00-02:00 rule is active Saturday 01:00.
    pub fn is_active_at(&self, hour: u8, weekday: WeekdayIndex) -> bool {
        if self.weekdays.contains(&weekday) && self.covers_hour(hour) {
            return true;
        }
        self.wraps_midnight()
            && hour <= self.end.hour()
            && self.weekdays.contains(&previous_weekday(weekday))
    }

    /// Weekdays rendered back to their abbreviations, for display.
    pub fn weekday_names(&self) -> Vec<&'static str> {
        self.weekdays
            .iter()
            .filter_map(|d| WEEKDAY_ABBREVIATIONS.get(*d as usize).copied())
            .collect()
    }
}

fn previous_weekday(weekday: WeekdayIndex) -> WeekdayIndex {
    (weekday + 6) % 7
}

impl TryFrom<&RuleRow> for VenueRule {
    type Error = FormatError;

    fn try_from(row: &RuleRow) -> Result<Self, Self::Error> {
        let category_id = row.category_id.trim();
        if category_id.is_empty() {
            return Err(FormatError::MissingField("category_id"));
        }
        if row.start.trim().is_empty() {
            return Err(FormatError::MissingField("start"));
        }
        if row.end.trim().is_empty() {
            return Err(FormatError::MissingField("end"));
        }
        if row.days.trim().is_empty() {
            return Err(FormatError::MissingField("days"));
        }

        Ok(Self {
            category_id: category_id.to_string(),
            start: parse_time(&row.start)?,
            end: parse_time(&row.end)?,
            weekdays: try_parse_day_range(&row.days)?,
        })
    }
}
