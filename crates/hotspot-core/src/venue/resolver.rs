//! Maps "now" to the set of venue categories plausibly generating demand.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::parse::WeekdayIndex;
use super::rule::VenueRule;

static NO_CATEGORIES: BTreeSet<String> = BTreeSet::new();

/// Outcome of resolving a rule set against a moment in time.
///
/// `NoneActive` means no rule matched. It is kept distinct from an
/// `Active` set so callers can tell "nothing is open" apart from a
/// computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "categories", rename_all = "snake_case")]
pub enum ActiveCategories {
    Active(BTreeSet<String>),
    NoneActive,
}

impl ActiveCategories {
    pub fn is_none_active(&self) -> bool {
        matches!(self, ActiveCategories::NoneActive)
    }

    /// The active category ids; empty for `NoneActive`.
    pub fn categories(&self) -> &BTreeSet<String> {
        match self {
            ActiveCategories::Active(set) => set,
            ActiveCategories::NoneActive => &NO_CATEGORIES,
        }
    }

    pub fn contains(&self, category_id: &str) -> bool {
        self.categories().contains(category_id)
    }

    pub fn len(&self) -> usize {
        self.categories().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories().is_empty()
    }

    pub fn into_set(self) -> BTreeSet<String> {
        match self {
            ActiveCategories::Active(set) => set,
            ActiveCategories::NoneActive => BTreeSet::new(),
        }
    }
}

/// Evaluate every rule at `now_hour` (0-23) on `now_weekday` (0 = Monday).
pub fn resolve_active_categories(
    rules: &[VenueRule],
    now_hour: u8,
    now_weekday: WeekdayIndex,
) -> ActiveCategories {
    let active: BTreeSet<String> = rules
        .iter()
        .filter(|rule| rule.is_active_at(now_hour, now_weekday))
        .map(|rule| rule.category_id.clone())
        .collect();

    if active.is_empty() {
        ActiveCategories::NoneActive
    } else {
        ActiveCategories::Active(active)
    }
}

/// Evaluate every rule at a local date-time.
pub fn resolve_at(rules: &[VenueRule], at: NaiveDateTime) -> ActiveCategories {
    resolve_active_categories(
        rules,
        at.hour() as u8,
        at.weekday().num_days_from_monday() as WeekdayIndex,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::rule::RuleRow;
    use chrono::NaiveDate;

    fn rules(rows: &[(&str, &str, &str, &str)]) -> Vec<VenueRule> {
        rows.iter()
            .map(|(id, start, end, days)| {
                VenueRule::try_from(&RuleRow::new(id, start, end, days)).unwrap()
            })
            .collect()
    }

    #[test]
    fn overnight_weekend_rule() {
        let rules = rules(&[("club", "22:00", "02:00", "Fri-Sat")]);
        assert!(resolve_active_categories(&rules, 23, 4).contains("club"));
        assert!(resolve_active_categories(&rules, 1, 5).contains("club"));
        assert!(resolve_active_categories(&rules, 12, 4).is_none_active());
    }

    #[test]
    fn duplicate_categories_collapse() {
        let rules = rules(&[
            ("cafe", "08:00", "10:00", "Sun-Sat"),
            ("cafe", "09:00", "12:00", "Sun-Sat"),
            ("park", "09:00", "17:00", "Sun-Sat"),
        ]);
        let active = resolve_active_categories(&rules, 9, 2);
        assert_eq!(active.len(), 2);
        assert_eq!(
            active.into_set(),
            ["cafe", "park"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn weekday_filter_applies() {
        let rules = rules(&[("office", "16:00", "20:00", "Mon-Sat")]);
        assert!(resolve_active_categories(&rules, 17, 4).contains("office"));
        assert!(resolve_active_categories(&rules, 17, 5).is_none_active());
        assert!(resolve_active_categories(&rules, 17, 6).is_none_active());
    }

    #[test]
    fn empty_rule_list_yields_empty_none_active() {
        let active = resolve_active_categories(&[], 12, 0);
        assert!(active.is_none_active());
        assert!(active.categories().is_empty());
    }

    #[test]
    fn resolve_at_uses_local_hour_and_weekday() {
        let rules = rules(&[("club", "22:00", "02:00", "Fri-Sat")]);
        // 2025-06-13 is a Friday.
        let friday_late = NaiveDate::from_ymd_opt(2025, 6, 13)
            .unwrap()
            .and_hms_opt(23, 15, 0)
            .unwrap();
        let saturday_early = NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        assert!(resolve_at(&rules, friday_late).contains("club"));
        assert!(resolve_at(&rules, saturday_early).contains("club"));
    }

    #[test]
    fn sentinel_serializes_with_status_tag() {
        let json = serde_json::to_value(ActiveCategories::NoneActive).unwrap();
        assert_eq!(json["status"], "none_active");
        let active = ActiveCategories::Active(["cafe".to_string()].into_iter().collect());
        let json = serde_json::to_value(active).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["categories"][0], "cafe");
    }
}
