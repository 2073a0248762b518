mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use congress_tracker_lib::PipelineConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "congress-tracker")]
#[command(about = "Load congressional trading disclosures and reference data")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Ticker cache file (overrides CONGRESS_TRACKER_CACHE_PATH)
    #[arg(long, global = true)]
    cache_path: Option<PathBuf>,

    /// Legislator YAML file; repeat for several, later files win
    /// (overrides CONGRESS_TRACKER_LEGISLATOR_FILES)
    #[arg(long = "legislators", global = true)]
    legislator_paths: Vec<PathBuf>,

    /// Committee membership YAML (overrides CONGRESS_TRACKER_COMMITTEE_FILE)
    #[arg(long, global = true)]
    committees: Option<PathBuf>,

    /// Stop reading legislators after this many entries
    #[arg(long, global = true)]
    max_legislators: Option<usize>,

    /// YAML table of known tickers (overrides CONGRESS_TRACKER_TICKER_SEED)
    #[arg(long, global = true)]
    ticker_seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full startup sequence and print what was loaded
    Status(commands::status::StatusArgs),
    /// Look up ticker metadata, caching misses
    Lookup(commands::lookup::LookupArgs),
    /// Show the state and committees of legislators
    Legislator(commands::legislator::LegislatorArgs),
}

impl Cli {
    fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(path) = &self.cache_path {
            config.cache_path = path.clone();
        }
        if !self.legislator_paths.is_empty() {
            config.legislator_paths = self.legislator_paths.clone();
        }
        if let Some(path) = &self.committees {
            config.committee_path = path.clone();
        }
        if self.max_legislators.is_some() {
            config.max_legislators = self.max_legislators;
        }
        if let Some(path) = &self.ticker_seed {
            config.ticker_seed_path = Some(path.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("congress_tracker=info".parse()?)
                .add_directive("congress_feed_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    // only `status` fetches the feed
    let mut config = match &cli.command {
        Commands::Status(_) => PipelineConfig::from_env()?,
        Commands::Lookup(_) | Commands::Legislator(_) => PipelineConfig::local_from_env()?,
    };
    cli.apply_overrides(&mut config);

    match &cli.command {
        Commands::Status(args) => commands::status::run(args, config, &format).await?,
        Commands::Lookup(args) => commands::lookup::run(args, &config, &format)?,
        Commands::Legislator(args) => commands::legislator::run(args, &config, &format)?,
    }

    Ok(())
}
