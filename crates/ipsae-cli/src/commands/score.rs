use crate::cli::ScoreArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use crate::report::{self, ReportPaths};
use crate::utils::progress::CliProgressHandler;
use ipsae::engine::progress::ProgressReporter;
use ipsae::workflows;
use tracing::{info, warn};

pub fn run(args: ScoreArgs) -> Result<ReportPaths> {
    let config = build_config(&args.scoring)?;
    info!(
        "Using PAE cutoff {} and distance cutoff {}.",
        config.scoring.pae_cutoff(),
        config.scoring.dist_cutoff()
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::score::run_with_progress(
        &args.structure,
        &args.pae,
        &config.scoring,
        &reporter,
    )?;

    if result.interacting_pair_count() == 0 {
        warn!("No chain pair has a qualifying residue pair under the current cutoffs.");
    }

    let paths = report::write_reports(&config.output_dir, &args.structure, &args.pae, &result)?;

    print!("{}", report::render_chain_pairs(&result));
    println!("Chain-pair table written to: {}", paths.chain_pairs.display());
    println!("Residue table written to:    {}", paths.residues.display());
    println!("Full report written to:      {}", paths.json.display());

    Ok(paths)
}
