use crate::cli::ScanArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::report::{self, SummaryRow};
use crate::scanner::FileScanner;
use crate::utils::progress::batch_bar;
use ipsae::workflows;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Outcome of a directory scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    pub scored: usize,
    pub failed: usize,
    pub summary_path: Option<PathBuf>,
}

pub fn run(args: ScanArgs) -> Result<ScanSummary> {
    let config = build_config(&args.scoring)?;
    let scanner = FileScanner::scan(&args.dir)?;
    let matches = scanner.matches();

    if matches.is_empty() {
        warn!(
            "No structure/PAE pairs found under '{}' ({} structure file(s), {} PAE file(s)).",
            args.dir.display(),
            scanner.structure_count(),
            scanner.pae_count()
        );
        println!("No structure/PAE pairs found under {}.", args.dir.display());
        return Ok(ScanSummary {
            scored: 0,
            failed: 0,
            summary_path: None,
        });
    }

    println!("Scoring {} model(s)...", matches.len());
    let pb = batch_bar(matches.len() as u64);

    let mut rows = Vec::new();
    let mut scored = 0;
    let mut failed = 0;
    for model in &matches {
        let label = model.key.to_string();
        let outcome = workflows::score::run(&model.structure, &model.pae, &config.scoring)
            .map_err(CliError::from)
            .and_then(|result| {
                report::write_reports(&config.output_dir, &model.structure, &model.pae, &result)?;
                Ok(result)
            });

        match outcome {
            Ok(result) => {
                info!("Scored {}.", label);
                rows.extend(SummaryRow::from_result(&label, &model.structure, &model.pae, &result));
                scored += 1;
            }
            Err(e) => {
                pb.suspend(|| error!("Failed to score {}: {}", label, e));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary_path = report::write_summary(&config.output_dir, &rows)?;
    println!(
        "Scored {} of {} model(s); summary written to: {}",
        scored,
        matches.len(),
        summary_path.display()
    );
    if failed > 0 {
        warn!("{} model(s) could not be scored.", failed);
        println!("{} model(s) failed; rerun with -v for details.", failed);
    }

    Ok(ScanSummary {
        scored,
        failed,
        summary_path: Some(summary_path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScoringArgs;
    use crate::report::SUMMARY_FILE_NAME;
    use crate::utils::fixtures::write_dimer;
    use std::fs;
    use tempfile::tempdir;

    fn scan_args(dir: PathBuf, output_dir: PathBuf) -> ScanArgs {
        ScanArgs {
            dir,
            scoring: ScoringArgs {
                output_dir: Some(output_dir),
                ..Default::default()
            },
        }
    }

    #[test]
    fn scan_scores_every_match_and_counts_failures() {
        let runs = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_dimer(runs.path(), "job_model_0.pdb", "job_full_data_0.json");
        write_dimer(runs.path(), "job_model_1.pdb", "job_full_data_1.json");
        write_dimer(runs.path(), "job_model_2.pdb", "job_full_data_2.json");
        fs::write(runs.path().join("job_full_data_2.json"), r#"{"plddt": []}"#).unwrap();

        let summary = run(scan_args(runs.path().to_path_buf(), out.path().to_path_buf())).unwrap();
        assert_eq!(summary.scored, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.summary_path, Some(out.path().join(SUMMARY_FILE_NAME)));

        let content = fs::read_to_string(out.path().join(SUMMARY_FILE_NAME)).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("job/model_0"));
        assert!(!content.contains("job/model_2"));
        assert!(out.path().join("job_model_1_15_15.csv").is_file());
        assert!(!out.path().join("job_model_2_15_15.csv").exists());
    }

    #[test]
    fn empty_directory_writes_no_summary() {
        let runs = tempdir().unwrap();
        let out = runs.path().join("out");

        let summary = run(scan_args(runs.path().to_path_buf(), out.clone())).unwrap();
        assert_eq!(summary.scored, 0);
        assert_eq!(summary.summary_path, None);
        assert!(!out.exists());
    }
}
