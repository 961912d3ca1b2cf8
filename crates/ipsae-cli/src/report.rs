use crate::error::Result;
use ipsae::engine::config::ScoringConfig;
use ipsae::engine::result::ScoreResult;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SUMMARY_FILE_NAME: &str = "ipsae_summary.csv";
pub const JSON_REPORT_SUFFIX: &str = "_ipsae.json";

/// File name without directories, a trailing `.gz`, or the format extension.
pub fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed = name
        .len()
        .checked_sub(3)
        .filter(|&cut| name.get(cut..).is_some_and(|ext| ext.eq_ignore_ascii_case(".gz")))
        .map_or(name.as_str(), |cut| &name[..cut]);
    Path::new(trimmed)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| trimmed.to_string())
}

/// `<pae>_<dist>` as used in report file names, e.g. `15_10.5`.
pub fn cutoff_tag(config: &ScoringConfig) -> String {
    format!("{}_{}", config.pae_cutoff(), config.dist_cutoff())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub chain_pairs: PathBuf,
    pub residues: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct ChainPairRow<'a> {
    chain_a: &'a str,
    chain_b: &'a str,
    pae_cutoff: f64,
    dist_cutoff: f64,
    n_residues_a: usize,
    n_residues_b: usize,
    n_pairs: usize,
    ipsae: f64,
    mean_pae: Option<f64>,
    mean_distance: Option<f64>,
    contact_fraction: f64,
}

#[derive(Serialize)]
struct ResidueRow<'a> {
    index: usize,
    chain: &'a str,
    residue_number: isize,
    insertion_code: Option<char>,
    residue_name: &'a str,
    n_partners: usize,
    ipsae: f64,
    mean_pae: Option<f64>,
    mean_distance: Option<f64>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    structure_path: &'a Path,
    pae_path: &'a Path,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

/// One chain pair of one scored model in the batch summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub model: String,
    pub structure: PathBuf,
    pub pae: PathBuf,
    pub chain_a: String,
    pub chain_b: String,
    pub n_pairs: usize,
    pub ipsae: f64,
    pub mean_pae: Option<f64>,
    pub mean_distance: Option<f64>,
    pub contact_fraction: f64,
}

impl SummaryRow {
    pub fn from_result(
        model: &str,
        structure: &Path,
        pae: &Path,
        result: &ScoreResult,
    ) -> Vec<Self> {
        result
            .chain_pair_scores()
            .iter()
            .map(|pair| Self {
                model: model.to_string(),
                structure: structure.to_path_buf(),
                pae: pae.to_path_buf(),
                chain_a: pair.chain_a.clone(),
                chain_b: pair.chain_b.clone(),
                n_pairs: pair.n_pairs,
                ipsae: pair.ipsae,
                mean_pae: pair.mean_pae,
                mean_distance: pair.mean_distance,
                contact_fraction: pair.contact_fraction,
            })
            .collect()
    }
}

/// Writes the chain-pair table, the residue table and the JSON report for one model.
pub fn write_reports(
    output_dir: &Path,
    structure_path: &Path,
    pae_path: &Path,
    result: &ScoreResult,
) -> Result<ReportPaths> {
    fs::create_dir_all(output_dir)?;

    let stem = file_stem(structure_path);
    let tag = cutoff_tag(result.config());
    let paths = ReportPaths {
        chain_pairs: output_dir.join(format!("{stem}_{tag}.csv")),
        residues: output_dir.join(format!("{stem}_{tag}_byres.csv")),
        json: output_dir.join(format!("{stem}{JSON_REPORT_SUFFIX}")),
    };

    write_chain_pairs(&paths.chain_pairs, result)?;
    write_residues(&paths.residues, result)?;

    let report = JsonReport {
        structure_path,
        pae_path,
        result,
    };
    let writer = BufWriter::new(File::create(&paths.json)?);
    serde_json::to_writer_pretty(writer, &report)?;
    debug!("Wrote JSON report to '{}'.", paths.json.display());

    info!("Reports for '{}' written to '{}'.", stem, output_dir.display());
    Ok(paths)
}

fn write_chain_pairs(path: &Path, result: &ScoreResult) -> Result<()> {
    let config = result.config();
    let mut writer = csv::Writer::from_path(path)?;
    for pair in result.chain_pair_scores() {
        writer.serialize(ChainPairRow {
            chain_a: &pair.chain_a,
            chain_b: &pair.chain_b,
            pae_cutoff: config.pae_cutoff(),
            dist_cutoff: config.dist_cutoff(),
            n_residues_a: pair.n_residues_a,
            n_residues_b: pair.n_residues_b,
            n_pairs: pair.n_pairs,
            ipsae: pair.ipsae,
            mean_pae: pair.mean_pae,
            mean_distance: pair.mean_distance,
            contact_fraction: pair.contact_fraction,
        })?;
    }
    writer.flush()?;
    debug!("Wrote chain-pair table to '{}'.", path.display());
    Ok(())
}

fn write_residues(path: &Path, result: &ScoreResult) -> Result<()> {
    let structure = result.structure();
    let mut writer = csv::Writer::from_path(path)?;
    for (score, residue) in result.residue_scores().iter().zip(structure.residues()) {
        writer.serialize(ResidueRow {
            index: score.index.get(),
            chain: &residue.chain_id,
            residue_number: residue.number,
            insertion_code: residue.insertion_code,
            residue_name: &residue.name,
            n_partners: score.n_partners,
            ipsae: score.ipsae,
            mean_pae: score.mean_pae,
            mean_distance: score.mean_distance,
        })?;
    }
    writer.flush()?;
    debug!("Wrote residue table to '{}'.", path.display());
    Ok(())
}

/// Writes `ipsae_summary.csv` into `output_dir` and returns its path.
pub fn write_summary(output_dir: &Path, rows: &[SummaryRow]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(SUMMARY_FILE_NAME);
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} summary row(s) to '{}'.", rows.len(), path.display());
    Ok(path)
}

/// Fixed-width chain-pair table for the terminal.
pub fn render_chain_pairs(result: &ScoreResult) -> String {
    let mut out = format!(
        "{:<8} {:<8} {:>8} {:>8} {:>10} {:>10} {:>9}\n",
        "chain_a", "chain_b", "n_pairs", "ipsae", "mean_pae", "mean_dist", "fraction"
    );
    let optional =
        |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    for pair in result.chain_pair_scores() {
        out.push_str(&format!(
            "{:<8} {:<8} {:>8} {:>8.4} {:>10} {:>10} {:>9.4}\n",
            pair.chain_a,
            pair.chain_b,
            pair.n_pairs,
            pair.ipsae,
            optional(pair.mean_pae),
            optional(pair.mean_distance),
            pair.contact_fraction
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::write_dimer;
    use ipsae::workflows::score;
    use tempfile::tempdir;

    fn scored_dimer(dir: &Path) -> (PathBuf, PathBuf, ScoreResult) {
        let (structure, pae) = write_dimer(dir, "job_model_0.pdb", "job_full_data_0.json");
        let config = ScoringConfig::new(15.0, 10.5).unwrap();
        let result = score::run(&structure, &pae, &config).unwrap();
        (structure, pae, result)
    }

    #[test]
    fn file_stem_strips_compression_and_extension() {
        assert_eq!(file_stem(Path::new("runs/a_model_1.pdb")), "a_model_1");
        assert_eq!(file_stem(Path::new("a_scores.json.gz")), "a_scores");
        assert_eq!(file_stem(Path::new("A.CIF.GZ")), "A");
        assert_eq!(file_stem(Path::new("plain")), "plain");
    }

    #[test]
    fn cutoff_tag_drops_trailing_zero_fractions() {
        let config = ScoringConfig::new(15.0, 10.5).unwrap();
        assert_eq!(cutoff_tag(&config), "15_10.5");
    }

    #[test]
    fn reports_are_written_with_expected_names_and_rows() {
        let dir = tempdir().unwrap();
        let (structure, pae, result) = scored_dimer(dir.path());
        let out = dir.path().join("out");

        let paths = write_reports(&out, &structure, &pae, &result).unwrap();
        assert_eq!(paths.chain_pairs, out.join("job_model_0_15_10.5.csv"));
        assert_eq!(paths.residues, out.join("job_model_0_15_10.5_byres.csv"));
        assert_eq!(paths.json, out.join("job_model_0_ipsae.json"));

        let pairs = fs::read_to_string(&paths.chain_pairs).unwrap();
        let mut lines = pairs.lines();
        assert_eq!(
            lines.next().unwrap(),
            concat!(
                "chain_a,chain_b,pae_cutoff,dist_cutoff,n_residues_a,n_residues_b,",
                "n_pairs,ipsae,mean_pae,mean_distance,contact_fraction"
            )
        );
        assert!(lines.next().unwrap().starts_with("A,B,15.0,10.5,2,2,2,"));
        assert!(lines.next().is_none());

        let residues = fs::read_to_string(&paths.residues).unwrap();
        assert_eq!(residues.lines().count(), 5);
        let far = residues.lines().last().unwrap();
        assert_eq!(far, "3,B,2,,SER,0,0.0,,");
    }

    #[test]
    fn json_report_carries_paths_and_scores() {
        let dir = tempdir().unwrap();
        let (structure, pae, result) = scored_dimer(dir.path());

        let paths = write_reports(dir.path(), &structure, &pae, &result).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(paths.json).unwrap()).unwrap();

        assert_eq!(json["pae_path"].as_str(), pae.to_str());
        assert_eq!(json["config"]["pae_cutoff"], 15.0);
        assert_eq!(json["chain_pair_scores"][0]["n_pairs"], 2);
        assert_eq!(json["residue_scores"].as_array().unwrap().len(), 4);
        assert!(json.get("pae").is_none());
    }

    #[test]
    fn summary_has_one_row_per_chain_pair() {
        let dir = tempdir().unwrap();
        let (structure, pae, result) = scored_dimer(dir.path());

        let rows = SummaryRow::from_result("job/0", &structure, &pae, &result);
        assert_eq!(rows.len(), 1);

        let path = write_summary(dir.path(), &rows).unwrap();
        assert_eq!(path.file_name().unwrap(), SUMMARY_FILE_NAME);
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("model,structure,pae,chain_a,chain_b,n_pairs,"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn terminal_table_marks_absent_means() {
        let dir = tempdir().unwrap();
        let (structure, pae) = write_dimer(dir.path(), "m.pdb", "p.json");
        let config = ScoringConfig::new(15.0, 0.5).unwrap();
        let result = score::run(&structure, &pae, &config).unwrap();

        let table = render_chain_pairs(&result);
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with("A        B               0"));
        assert!(row.contains(" - "));
    }
}
