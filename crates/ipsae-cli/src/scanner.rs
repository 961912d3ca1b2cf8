use crate::error::{CliError, Result};
use crate::report::{JSON_REPORT_SUFFIX, file_stem};
use ipsae::core::io::format::{PaeFormat, StructureFormat};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SUFFIX_STARTS: [&str; 3] = ["unrelaxed", "relaxed", "scores"];

/// Identity of one predicted model, recovered from a ColabFold or AlphaFold 3 file name.
///
/// Structure and PAE files of the same model share a key:
/// `X_unrelaxed_..._model_1_seed_000.pdb` and `X_scores_rank_001_..._model_1_seed_000.json`
/// both map to job `X`, model 1, seed `000`; `fold_x_model_0.cif` and
/// `fold_x_full_data_0.json` both map to job `fold_x`, model 0.
///
/// Only the last `model_<n>` or `full_data_<n>` marker is read, so job names may
/// themselves contain `model`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelKey {
    pub job: String,
    pub model: Option<u32>,
    pub seed: Option<String>,
}

impl ModelKey {
    /// Parses an extension-less file stem.
    pub fn parse(stem: &str) -> Self {
        let tokens: Vec<&str> = stem.split('_').collect();
        let whole = || Self {
            job: stem.to_string(),
            model: None,
            seed: None,
        };

        let marker = (0..tokens.len())
            .rev()
            .find_map(|at| model_marker(&tokens[at..]).map(|model| (at, model)));

        let (job_end, model) = match marker {
            Some((at, model)) => {
                let suffix_start = tokens[..at]
                    .iter()
                    .rposition(|t| SUFFIX_STARTS.contains(t))
                    .filter(|&start| start > 0)
                    .unwrap_or(at);
                (suffix_start, Some(model))
            }
            None => match tokens.iter().position(|t| SUFFIX_STARTS.contains(t)) {
                Some(start) => (start, None),
                None => return whole(),
            },
        };
        if job_end == 0 {
            return whole();
        }

        let seed = tokens
            .windows(2)
            .skip(job_end)
            .find(|w| w[0] == "seed")
            .map(|w| w[1].to_string());

        Self {
            job: tokens[..job_end].join("_"),
            model,
            seed,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::parse(&file_stem(path))
    }
}

/// `model_<n>` or `full_data_<n>` at the start of `tokens`.
fn model_marker(tokens: &[&str]) -> Option<u32> {
    match tokens {
        ["model", n, ..] | ["full", "data", n, ..] => n.parse().ok(),
        _ => None,
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.job)?;
        if let Some(model) = self.model {
            write!(f, "/model_{}", model)?;
        }
        if let Some(seed) = &self.seed {
            write!(f, "/seed_{}", seed)?;
        }
        Ok(())
    }
}

/// A structure file and the PAE file predicted alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMatch {
    pub key: ModelKey,
    pub structure: PathBuf,
    pub pae: PathBuf,
}

/// Structure and PAE files discovered below a directory, indexed by [`ModelKey`].
#[derive(Debug, Default)]
pub struct FileScanner {
    structures: BTreeMap<ModelKey, PathBuf>,
    paes: BTreeMap<ModelKey, PathBuf>,
}

impl FileScanner {
    /// Walks `root` recursively. Files are visited in sorted path order, so the
    /// first of several files sharing a key is kept deterministically.
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(CliError::NotADirectory(root.to_path_buf()));
        }
        info!("Scanning directory '{}'.", root.display());

        let mut files = Vec::new();
        collect_files(root, &mut files)?;
        files.sort();

        let mut scanner = Self::default();
        for path in files {
            scanner.insert(path);
        }

        info!(
            "Found {} structure file(s) and {} PAE file(s).",
            scanner.structures.len(),
            scanner.paes.len()
        );
        Ok(scanner)
    }

    fn insert(&mut self, path: PathBuf) {
        let is_report = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(JSON_REPORT_SUFFIX));
        let (kind, index) = if StructureFormat::from_path(&path).is_some() {
            ("structure", &mut self.structures)
        } else if PaeFormat::from_path(&path).is_some() && !is_report {
            ("PAE", &mut self.paes)
        } else {
            return;
        };

        match index.entry(ModelKey::from_path(&path)) {
            Entry::Vacant(slot) => {
                debug!("Found {} file '{}' for {}.", kind, path.display(), slot.key());
                slot.insert(path);
            }
            Entry::Occupied(kept) => {
                warn!(
                    "Duplicate {} file '{}' for {}; keeping '{}'.",
                    kind,
                    path.display(),
                    kept.key(),
                    kept.get().display()
                );
            }
        }
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn pae_count(&self) -> usize {
        self.paes.len()
    }

    /// Keys present on both sides, in key order.
    pub fn matches(&self) -> Vec<ModelMatch> {
        let matches: Vec<ModelMatch> = self
            .structures
            .iter()
            .filter_map(|(key, structure)| {
                self.paes.get(key).map(|pae| ModelMatch {
                    key: key.clone(),
                    structure: structure.clone(),
                    pae: pae.clone(),
                })
            })
            .collect();

        for key in self.structures.keys().filter(|k| !self.paes.contains_key(*k)) {
            debug!("No PAE file for structure {}.", key);
        }
        info!("Matched {} structure/PAE pair(s).", matches.len());
        matches
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), files)?;
        } else if file_type.is_file() || entry.path().is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}
