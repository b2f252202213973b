//! Temporal venue-rule resolution.
//!
//! Decides which venue categories are "open" for a given hour and
//! weekday, including windows that run past midnight and day ranges that
//! wrap around the week.

mod builtin;
pub mod parse;
pub mod resolver;
pub mod rule;
pub mod table;

pub use builtin::BUILTIN_CATEGORIES;
pub use parse::{parse_day_range, parse_time, TimeOfDay, WeekdayIndex};
pub use resolver::{resolve_active_categories, resolve_at, ActiveCategories};
pub use rule::{RuleRow, VenueRule};
pub use table::{RuleTable, SkippedRow};
