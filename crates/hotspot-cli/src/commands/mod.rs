pub mod categories;
pub mod cluster;
pub mod config;
pub mod recommend;
pub mod rules;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use hotspot_core::{Config, RuleTable};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Accepted formats for `--at`.
const AT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse a `--at` value, or take the local wall-clock time.
pub fn parse_at(at: Option<&str>) -> Result<NaiveDateTime, String> {
    let Some(text) = at else {
        return Ok(Local::now().naive_local());
    };
    AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| format!("invalid --at value '{text}', expected YYYY-MM-DD HH:MM"))
}

/// The rule table from `--rules`, then the configured path, then the
/// built-in table.
pub fn load_rules(explicit: Option<&Path>, config: &Config) -> Result<RuleTable, Box<dyn std::error::Error>> {
    let configured: Option<PathBuf> = config.rule_table_path();
    let path = explicit.or(configured.as_deref());
    Ok(RuleTable::load_or_builtin(path)?)
}

/// Read a JSON file into `T`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid JSON in {}: {e}", path.display()).into())
}
