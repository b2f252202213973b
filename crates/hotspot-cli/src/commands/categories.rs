use std::path::PathBuf;

use clap::Args;
use hotspot_core::{ActiveCategories, CategoryDirectory, Config, StaticCategoryDirectory};

use super::{load_rules, parse_at, CmdResult};

#[derive(Args)]
pub struct CategoriesArgs {
    /// Local time to resolve for ("YYYY-MM-DD HH:MM"); defaults to now
    #[arg(long)]
    at: Option<String>,
    /// Rule table file (TOML); overrides the configured table
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Print human-readable names next to ids
    #[arg(long)]
    names: bool,
}

pub fn run(args: CategoriesArgs) -> CmdResult {
    let config = Config::load()?;
    let table = load_rules(args.rules.as_deref(), &config)?;
    let at = parse_at(args.at.as_deref())?;

    match table.resolve_at(at) {
        ActiveCategories::NoneActive => println!("none active"),
        ActiveCategories::Active(ids) => {
            let json = if args.names {
                let directory = StaticCategoryDirectory::from_rule_table(&table);
                let named: Vec<serde_json::Value> = ids
                    .iter()
                    .map(|id| {
                        serde_json::json!({
                            "id": id,
                            "name": directory.name_of(id),
                        })
                    })
                    .collect();
                serde_json::to_string_pretty(&named)?
            } else {
                serde_json::to_string_pretty(&ids)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
