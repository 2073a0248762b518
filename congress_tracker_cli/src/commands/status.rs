use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use congress_tracker_lib::{DataStore, PipelineConfig};

use crate::output::{print_json, print_summary_table, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Keep trades from this many days back (overrides CONGRESS_TRACKER_WINDOW_DAYS)
    #[arg(long)]
    pub window_days: Option<u32>,

    /// Feed request timeout in seconds (overrides CONGRESS_TRACKER_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Treat this date (YYYY-MM-DD) as today when filtering trades
    #[arg(long)]
    pub today: Option<String>,
}

pub async fn run(args: &StatusArgs, mut config: PipelineConfig, format: &OutputFormat) -> Result<()> {
    if let Some(days) = args.window_days {
        config.window_days = days;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    let today = args
        .today
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--today must be YYYY-MM-DD, got {:?}", raw))
        })
        .transpose()?;

    let mut store = DataStore::new(config);
    match today {
        Some(today) => store.initialize_at(today).await?,
        None => store.initialize().await?,
    }

    let summary = store.summary()?;
    match format {
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Json => print_json(&summary),
    }

    store.shutdown()?;
    Ok(())
}
