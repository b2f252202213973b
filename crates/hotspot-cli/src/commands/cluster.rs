use std::path::PathBuf;

use clap::Args;
use hotspot_core::{ClusterConfig, ClusterEngine, Config, Point};

use super::{read_json, CmdResult};

#[derive(Args)]
pub struct ClusterArgs {
    /// JSON array of points, e.g. [{"lat": 52.0, "lon": 4.0}]
    points: PathBuf,
    /// Absorption radius in km; defaults to the configured value
    #[arg(long)]
    epsilon: Option<f64>,
}

pub fn run(args: ClusterArgs) -> CmdResult {
    let config = Config::load()?;
    let points: Vec<Point> = read_json(&args.points)?;

    let engine = ClusterEngine::with_config(ClusterConfig {
        epsilon_km: args.epsilon.unwrap_or(config.clustering.epsilon_km),
    });
    let clusters = engine.cluster(&points);
    println!("{}", serde_json::to_string_pretty(&clusters)?);
    Ok(())
}
