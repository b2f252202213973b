use std::path::PathBuf;

use clap::Subcommand;
use hotspot_core::Config;

use super::{load_rules, CmdResult};

#[derive(Subcommand)]
pub enum RulesAction {
    /// Validate a rule table and list its rules and skipped rows
    Check {
        /// Rule table file (TOML); overrides the configured table
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Exit non-zero if any row was skipped
        #[arg(long)]
        strict: bool,
    },
    /// Print a rule table in TOML form
    Show {
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

pub fn run(action: RulesAction) -> CmdResult {
    let config = Config::load()?;
    match action {
        RulesAction::Check { rules, strict } => {
            let table = load_rules(rules.as_deref(), &config)?;
            let report = serde_json::json!({
                "rules": table.rules.iter().map(|rule| serde_json::json!({
                    "category_id": rule.category_id,
                    "start": rule.start.to_string(),
                    "end": rule.end.to_string(),
                    "weekdays": rule.weekday_names(),
                })).collect::<Vec<_>>(),
                "skipped": table.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            if strict && !table.skipped.is_empty() {
                return Err(format!("{} malformed rule(s)", table.skipped.len()).into());
            }
        }
        RulesAction::Show { rules } => {
            let table = load_rules(rules.as_deref(), &config)?;
            print!("{}", table.to_toml_string()?);
        }
    }
    Ok(())
}
