use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hotspot_core::{Config, Place, Planner, PlannerConfig, Point, StaticPlacesProvider};

use super::{load_rules, parse_at, read_json, CmdResult};

#[derive(Args)]
pub struct RecommendArgs {
    /// JSON array of candidate places (offline places source)
    places: PathBuf,
    /// Driver latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Driver longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Local time to plan for ("YYYY-MM-DD HH:MM"); defaults to now
    #[arg(long)]
    at: Option<String>,
    /// Rule table file (TOML); overrides the configured table
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Absorption radius in km; defaults to the configured value
    #[arg(long)]
    epsilon: Option<f64>,
}

pub fn run(args: RecommendArgs) -> CmdResult {
    let config = Config::load()?;
    let table = load_rules(args.rules.as_deref(), &config)?;
    let at = parse_at(args.at.as_deref())?;
    let places: Vec<Place> = read_json(&args.places)?;

    let mut planner_config = PlannerConfig::from(&config);
    if let Some(epsilon) = args.epsilon {
        planner_config.cluster.epsilon_km = epsilon;
    }

    let mut planner = Planner::new(
        table,
        Arc::new(StaticPlacesProvider::new(places)),
        planner_config,
    );
    let driver = Point::new(args.lat, args.lon);

    let runtime = tokio::runtime::Runtime::new()?;
    let recommendation = runtime.block_on(planner.recommend(driver, at))?;
    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}
