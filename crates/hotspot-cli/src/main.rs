use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hotspot-cli", version, about = "Hotspot reposition CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Venue categories open at a given time
    Categories(commands::categories::CategoriesArgs),
    /// Rule table inspection
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// Cluster a file of points
    Cluster(commands::cluster::ClusterArgs),
    /// Recommend a busy target and an idle spot
    Recommend(commands::recommend::RecommendArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    // Logs go to stderr so JSON on stdout stays parseable.
    let filter = EnvFilter::try_from_env("HOTSPOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Categories(args) => commands::categories::run(args),
        Commands::Rules { action } => commands::rules::run(action),
        Commands::Cluster(args) => commands::cluster::run(args),
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
