use crate::core::io::format::{load_pae, load_structure};
use crate::engine::alignment::align;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::result::ScoreResult;
use crate::engine::scoring::score_with_progress;
use std::path::Path;
use tracing::{info, instrument};

/// Loads, aligns, and scores one structure/PAE pair.
///
/// # Errors
///
/// Returns [`EngineError::Parse`] if either file cannot be read and
/// [`EngineError::DimensionMismatch`] if their residue counts disagree.
pub fn run(
    structure_path: impl AsRef<Path>,
    pae_path: impl AsRef<Path>,
    config: &ScoringConfig,
) -> Result<ScoreResult, EngineError> {
    run_with_progress(structure_path, pae_path, config, &ProgressReporter::new())
}

/// Like [`run`], reporting stage and scan progress to `reporter`.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run_with_progress(
    structure_path: impl AsRef<Path>,
    pae_path: impl AsRef<Path>,
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> Result<ScoreResult, EngineError> {
    let structure_path = structure_path.as_ref();
    let pae_path = pae_path.as_ref();
    info!(
        "Scoring '{}' with '{}' (PAE cutoff {}, distance cutoff {}).",
        structure_path.display(),
        pae_path.display(),
        config.pae_cutoff(),
        config.dist_cutoff()
    );

    let complex = reporter.stage("Loading", || -> Result<_, EngineError> {
        let structure = load_structure(structure_path)?;
        let pae = load_pae(pae_path)?;
        info!(
            "Loaded {} residues in {} chain(s) and a {n}x{n} PAE matrix.",
            structure.residue_count(),
            structure.chains().len(),
            n = pae.dimension()
        );
        Ok(align(structure, pae)?)
    })?;

    let result = reporter.stage("Scoring", || -> Result<_, EngineError> {
        Ok(score_with_progress(&complex, config, reporter))
    })?;

    info!(
        "Scored {} chain pair(s); {} interacting.",
        result.chain_pair_scores().len(),
        result.interacting_pair_count()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::error::ParseErrorKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn atom_line(serial: usize, res: &str, chain: &str, seq: isize, xyz: [f64; 3]) -> String {
        format!(
            "ATOM  {:>5}  CA  {:>3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00 90.00           C",
            serial, res, chain, seq, xyz[0], xyz[1], xyz[2]
        )
    }

    /// Writes a two-chain, four-residue model and its PAE file.
    fn write_inputs(pae_json: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("model_0.pdb");
        let pdb = [
            atom_line(1, "MET", "A", 1, [0.0, 0.0, 0.0]),
            atom_line(2, "LYS", "A", 2, [3.8, 0.0, 0.0]),
            atom_line(3, "GLY", "B", 1, [0.0, 5.0, 0.0]),
            atom_line(4, "SER", "B", 2, [30.0, 30.0, 30.0]),
            "END".to_string(),
        ]
        .join("\n");
        fs::write(&structure, pdb).unwrap();

        let pae = dir.path().join("scores_0.json");
        fs::write(&pae, pae_json).unwrap();
        (dir, structure, pae)
    }

    const PAE_4X4: &str = r#"{"pae": [
        [0.0, 1.0, 4.0, 20.0],
        [1.0, 0.0, 6.0, 20.0],
        [2.0, 8.0, 0.0, 1.0],
        [20.0, 20.0, 1.0, 0.0]
    ]}"#;

    #[test]
    fn scores_a_complex_end_to_end() {
        let (_dir, structure, pae) = write_inputs(PAE_4X4);
        let config = ScoringConfig::new(10.0, 10.0).unwrap();

        let result = run(&structure, &pae, &config).unwrap();
        let pair = result.chain_pair("A", "B").unwrap();

        // A1-B1 (pae 4, d 5) and A2-B1 (pae 8, d ~6.28) qualify; B2 is far away.
        assert_eq!(pair.n_pairs, 2);
        assert!((pair.ipsae - (0.6 + 0.2) / 2.0).abs() < 1e-12);
        assert_eq!(pair.mean_pae, Some(6.0));
        assert_eq!(pair.contact_fraction, 0.5);
        assert_eq!(result.residue_scores().len(), 4);
        assert_eq!(result.residue_scores()[3].n_partners, 0);
        assert_eq!(result.config(), &config);
    }

    #[test]
    fn dimension_mismatch_is_reported_with_both_sizes() {
        let (_dir, structure, pae) = write_inputs(r#"{"pae": [[0.0, 1.0], [1.0, 0.0]]}"#);
        let config = ScoringConfig::new(10.0, 10.0).unwrap();

        let err = run(&structure, &pae, &config).unwrap_err();
        match err {
            EngineError::DimensionMismatch(mismatch) => {
                assert_eq!((mismatch.residues, mismatch.pae_dimension), (4, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_pae_key_names_the_file() {
        let (_dir, structure, pae) = write_inputs(r#"{"plddt": [1, 2]}"#);
        let config = ScoringConfig::new(10.0, 10.0).unwrap();

        let err = run(&structure, &pae, &config).unwrap_err();
        match &err {
            EngineError::Parse(parse) => {
                assert_eq!(parse.path, pae);
                assert!(matches!(
                    &parse.kind,
                    ParseErrorKind::MissingPaeKey { available } if available == &["plddt"]
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("scores_0.json"));
    }

    #[test]
    fn unsupported_structure_format_is_rejected() {
        let (dir, _structure, pae) = write_inputs(PAE_4X4);
        let config = ScoringConfig::new(10.0, 10.0).unwrap();

        let err = run(dir.path().join("model.xyz"), &pae, &config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ref e) if matches!(e.kind, ParseErrorKind::UnsupportedFormat { .. })
        ));
    }
}
