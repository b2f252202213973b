//! Built-in venue rule table.
//!
//! Used when no rule table path is configured. Category ids are opaque
//! slugs; the names map is what the CLI prints next to them.

use super::rule::RuleRow;

/// (category id, human-readable name)
pub const BUILTIN_CATEGORIES: [(&str, &str); 8] = [
    ("cafe", "Cafés"),
    ("restaurant", "Restaurants"),
    ("nightclub", "Clubs"),
    ("airport", "Airports"),
    ("hotel", "Hotels"),
    ("park", "Parks"),
    ("transport_hub", "Transportation Hubs"),
    ("office", "Offices"),
];

/// Rows of the built-in table.
///
/// "Sun-Sat" wraps and covers the whole week; "Mon-Sat" is Monday to
/// Friday since a forward range stops before its end day.
pub fn builtin_rows() -> Vec<RuleRow> {
    vec![
        RuleRow::new("cafe", "12:00", "14:59", "Sun-Sat"),
        RuleRow::new("restaurant", "19:00", "22:59", "Sun-Sat"),
        RuleRow::new("nightclub", "22:00", "23:59", "Sun-Sat"),
        RuleRow::new("nightclub", "02:00", "05:59", "Sun-Sat"),
        RuleRow::new("airport", "04:00", "08:59", "Sun-Sat"),
        RuleRow::new("airport", "21:00", "23:59", "Sun-Sat"),
        // Weekend-return peak. A day set cannot hold Sunday alone, so
        // Monday evening rides along.
        RuleRow::new("airport", "18:00", "23:59", "Sun-Mon"),
        RuleRow::new("airport", "00:00", "11:59", "Mon-Tue"),
        RuleRow::new("hotel", "07:00", "10:59", "Sun-Sat"),
        RuleRow::new("hotel", "15:00", "18:59", "Sun-Sat"),
        RuleRow::new("park", "11:00", "16:59", "Sun-Sat"),
        RuleRow::new("transport_hub", "06:00", "09:59", "Sun-Sat"),
        RuleRow::new("office", "16:00", "20:59", "Mon-Sat"),
    ]
}
