use anyhow::Result;
use clap::Args;
use congress_tracker_lib::{CommitteeDirectory, LegislatorDirectory, PipelineConfig};

use crate::output::{print_json, print_legislators_table, LegislatorView, OutputFormat};

#[derive(Args)]
pub struct LegislatorArgs {
    /// Bioguide IDs (e.g. P000197)
    #[arg(required = true)]
    pub bioguide_ids: Vec<String>,
}

/// Resolves legislators from the reference files only; the feed is not fetched.
pub fn run(args: &LegislatorArgs, config: &PipelineConfig, format: &OutputFormat) -> Result<()> {
    let legislators =
        LegislatorDirectory::build_with_budget(&config.legislator_paths, config.max_legislators);
    let committees = CommitteeDirectory::build(&config.committee_path);

    let views: Vec<LegislatorView> = args
        .bioguide_ids
        .iter()
        .map(|id| {
            let id = id.trim().to_uppercase();
            LegislatorView {
                state: legislators.state_of(&id).map(str::to_string),
                committees: committees.committees_of(&id).to_vec(),
                bioguide: id,
            }
        })
        .collect();

    match format {
        OutputFormat::Table => print_legislators_table(&views),
        OutputFormat::Json => print_json(&views),
    }
    Ok(())
}
