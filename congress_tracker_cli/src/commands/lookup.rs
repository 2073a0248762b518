use anyhow::{bail, Result};
use clap::Args;
use congress_tracker_lib::metadata;
use congress_tracker_lib::{PipelineConfig, TickerMetadataCache, TickerRecord};

use crate::output::{print_json, print_tickers_table, OutputFormat};

#[derive(Args)]
pub struct LookupArgs {
    /// Ticker symbols to look up (case-insensitive)
    #[arg(required = true)]
    pub tickers: Vec<String>,

    /// Only report cached entries; never insert
    #[arg(long)]
    pub cached_only: bool,
}

/// Looks tickers up against the on-disk cache without touching the feed.
pub fn run(args: &LookupArgs, config: &PipelineConfig, format: &OutputFormat) -> Result<()> {
    let source = metadata::source_for(config.ticker_seed_path.as_deref());
    let cache = TickerMetadataCache::open(config.cache_path.clone(), source);

    let records: Vec<TickerRecord> = if args.cached_only {
        let found: Vec<TickerRecord> = args.tickers.iter().filter_map(|t| cache.get(t)).collect();
        if found.is_empty() {
            bail!("none of the requested tickers are cached in {}", config.cache_path.display());
        }
        found
    } else {
        args.tickers.iter().map(|t| cache.lookup(t)).collect()
    };

    match format {
        OutputFormat::Table => print_tickers_table(&records),
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}
