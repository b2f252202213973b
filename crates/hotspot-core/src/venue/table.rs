//! Rule table ingestion.
//!
//! A rule table is a TOML document:
//!
//! ```toml
//! [[rule]]
//! category_id = "nightclub"
//! start = "22:00"
//! end = "02:00"
//! days = "Fri-Sun"
//!
//! [categories]
//! nightclub = "Clubs"
//! ```
//!
//! Rows are validated here, once, so the resolver only ever sees typed
//! [`VenueRule`]s. A malformed row is skipped with a warning; an unreadable
//! or unparsable file is a fatal [`ConfigError`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::builtin::{builtin_rows, BUILTIN_CATEGORIES};
use super::parse::WeekdayIndex;
use super::resolver::{resolve_active_categories, resolve_at, ActiveCategories};
use super::rule::{RuleRow, VenueRule};
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize, Serialize)]
struct RuleTableFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleRow>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

/// A row that failed validation, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position of the row in the table
    pub index: usize,
    pub row: RuleRow,
    pub reason: String,
}

/// A validated, immutable rule table snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleTable {
    pub rules: Vec<VenueRule>,
    pub skipped: Vec<SkippedRow>,
    /// Category id -> human-readable name
    pub categories: BTreeMap<String, String>,
}

impl RuleTable {
    /// Validate rows, skipping (and logging) the malformed ones.
    pub fn from_rows(rows: Vec<RuleRow>) -> Self {
        let mut rules = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            match VenueRule::try_from(&row) {
                Ok(rule) => {
                    if rule.weekdays.is_empty() {
                        tracing::warn!(
                            index,
                            category_id = %rule.category_id,
                            days = %row.days,
                            "rule covers no weekdays and will never match"
                        );
                    }
                    rules.push(rule);
                }
                Err(err) => {
                    tracing::warn!(
                        index,
                        category_id = %row.category_id,
                        error = %err,
                        "skipping malformed venue rule"
                    );
                    skipped.push(SkippedRow {
                        index,
                        reason: err.to_string(),
                        row,
                    });
                }
            }
        }

        Self {
            rules,
            skipped,
            categories: BTreeMap::new(),
        }
    }

    /// Parse a TOML rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailed`] if the document is not valid
    /// TOML or does not have the rule table shape.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: RuleTableFile = toml::from_str(content)?;
        let mut table = Self::from_rows(file.rules);
        table.categories = file.categories;
        Ok(table)
    }

    /// Load a TOML rule table from disk.
    ///
    /// # Errors
    ///
    /// A missing or unreadable file gives [`ConfigError::LoadFailed`]; a
    /// file that cannot be parsed gives [`ConfigError::ParseFailed`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            rules = table.rules.len(),
            skipped = table.skipped.len(),
            "loaded venue rule table"
        );
        Ok(table)
    }

    /// Load from `path` when given, otherwise the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let mut table = Self::from_rows(builtin_rows());
        table.categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        table
    }

    /// Serialize the valid rules back into table form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a rule whose weekday set
    /// no "Start-End" range can express.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                Ok(RuleRow {
                    category_id: rule.category_id.clone(),
                    start: rule.start.to_string(),
                    end: rule.end.to_string(),
                    days: days_to_range(rule)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let file = RuleTableFile {
            rules,
            categories: self.categories.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn resolve(&self, now_hour: u8, now_weekday: WeekdayIndex) -> ActiveCategories {
        resolve_active_categories(&self.rules, now_hour, now_weekday)
    }

    pub fn resolve_at(&self, at: NaiveDateTime) -> ActiveCategories {
        resolve_at(&self.rules, at)
    }
}

/// Rebuild a "Start-End" string that parses back to the same weekday set.
fn days_to_range(rule: &VenueRule) -> Result<String, ConfigError> {
    use super::parse::{parse_day_range, WEEKDAY_ABBREVIATIONS};

    for start in WEEKDAY_ABBREVIATIONS {
        for end in WEEKDAY_ABBREVIATIONS {
            let candidate = format!("{start}-{end}");
            if parse_day_range(&candidate) == rule.weekdays {
                return Ok(candidate);
            }
        }
    }
    // Non-contiguous sets only come from hand-built rules.
    Err(ConfigError::InvalidValue {
        key: format!("{}.days", rule.category_id),
        message: format!("weekdays {:?} are not a contiguous range", rule.weekday_names()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_fully_valid() {
        let table = RuleTable::builtin();
        assert!(table.skipped.is_empty());
        assert_eq!(table.rules.len(), builtin_rows().len());
        for rule in &table.rules {
            assert!(table.categories.contains_key(&rule.category_id));
        }
    }

    #[test]
    fn builtin_table_covers_lunch_and_late_night() {
        let table = RuleTable::builtin();
        // Wednesday lunchtime
        let lunch = table.resolve(13, 2);
        assert!(lunch.contains("cafe"));
        assert!(lunch.contains("park"));
        assert!(!lunch.contains("office"));
        // Saturday 23:00
        let late = table.resolve(23, 5);
        assert!(late.contains("nightclub"));
        assert!(late.contains("airport"));
    }

    #[test]
    fn builtin_table_nothing_open_at_one_am() {
        // Wednesday 01:00 falls between the nightclub windows.
        assert!(RuleTable::builtin().resolve(1, 2).is_none_active());
    }

    #[test]
    fn builtin_airport_evening_peak_spills_into_monday() {
        let table = RuleTable::builtin();
        // Sunday and Monday evenings both count; Tuesday does not.
        assert!(table.resolve(19, 6).contains("airport"));
        assert!(table.resolve(19, 0).contains("airport"));
        assert!(table.resolve(20, 0).contains("airport"));
        assert!(!table.resolve(19, 1).contains("airport"));
        assert!(!table.resolve(17, 0).contains("airport"));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let rows = vec![
            RuleRow::new("cafe", "12:00", "14:00", "Sun-Sat"),
            RuleRow::new("broken", "noon", "14:00", "Sun-Sat"),
            RuleRow::new("bar", "18:00", "23:00", "Mon-Fry"),
            RuleRow::new("park", "11:00", "16:00", "Sun-Sat"),
        ];
        let table = RuleTable::from_rows(rows);
        assert_eq!(table.rules.len(), 2);
        assert_eq!(table.skipped.len(), 2);
        assert_eq!(table.skipped[0].index, 1);
        assert_eq!(table.skipped[1].index, 2);
        assert!(table.skipped[1].reason.contains("Fry"));
    }

    #[test]
    fn toml_round_trip_preserves_rules() {
        let table = RuleTable::builtin();
        let text = table.to_toml_string().unwrap();
        let reparsed = RuleTable::from_toml_str(&text).unwrap();
        assert_eq!(reparsed.rules, table.rules);
        assert_eq!(reparsed.categories, table.categories);
    }

    #[test]
    fn non_contiguous_weekdays_cannot_be_exported() {
        let mut table = RuleTable::from_rows(vec![RuleRow::new("cafe", "12:00", "14:00", "Mon-Tue")]);
        table.rules[0].weekdays = [0, 2].into_iter().collect();
        let err = table.to_toml_string().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "cafe.days"));
    }

    #[test]
    fn empty_weekday_set_exports_as_same_day_range() {
        let table = RuleTable::from_rows(vec![RuleRow::new("cafe", "12:00", "14:00", "Tue-Tue")]);
        let reparsed = RuleTable::from_toml_str(&table.to_toml_string().unwrap()).unwrap();
        assert!(reparsed.skipped.is_empty());
        assert_eq!(reparsed.rules, table.rules);
    }

    #[test]
    fn invalid_toml_is_a_parse_failure() {
        let err = RuleTable::from_toml_str("[[rule]\ncategory_id = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let err = RuleTable::load(Path::new("/definitely/not/here/rules.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }
}
