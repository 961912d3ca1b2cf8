use super::config::ScoringConfig;
use crate::core::models::ids::ResidueIndex;
use crate::core::models::pae::PaeMatrix;
use crate::core::models::structure::StructureData;
use serde::Serialize;
use std::sync::Arc;

/// One qualifying cross-chain residue pair. `first` precedes `second` in file order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub first: ResidueIndex,
    pub second: ResidueIndex,
    pub pae: f64,
    pub distance: f64,
}

/// Interaction summary for an unordered pair of distinct chains.
///
/// `chain_a` precedes `chain_b` in the structure's chain order. A pair without
/// qualifying residue pairs carries `n_pairs == 0`, zero scores, and `None` means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainPairScore {
    pub chain_a: String,
    pub chain_b: String,
    pub n_residues_a: usize,
    pub n_residues_b: usize,
    /// Number of qualifying residue pairs.
    pub n_pairs: usize,
    /// Mean pair confidence `1 - pae / pae_cutoff` over the qualifying pairs.
    pub ipsae: f64,
    pub mean_pae: Option<f64>,
    pub mean_distance: Option<f64>,
    /// Qualifying pairs divided by `n_residues_a * n_residues_b`.
    pub contact_fraction: f64,
    /// Qualifying pairs in scan order.
    pub contacts: Vec<Contact>,
}

impl ChainPairScore {
    pub fn is_interacting(&self) -> bool {
        self.n_pairs > 0
    }

    /// Whether this entry describes chains `a` and `b`, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.chain_a == a && self.chain_b == b) || (self.chain_a == b && self.chain_b == a)
    }
}

/// Interchain interaction summary for a single residue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidueScore {
    pub index: ResidueIndex,
    /// Number of qualifying partners in other chains.
    pub n_partners: usize,
    pub ipsae: f64,
    pub mean_pae: Option<f64>,
    pub mean_distance: Option<f64>,
}

impl ResidueScore {
    pub fn is_interacting(&self) -> bool {
        self.n_partners > 0
    }
}

/// Immutable outcome of scoring one aligned complex.
///
/// Holds a chain-pair entry for every unordered pair of distinct chains and a residue
/// entry for every residue, together with shared handles on the inputs that produced
/// them. Transformations such as [`interacting_only`](Self::interacting_only) return a
/// new container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    config: ScoringConfig,
    chain_pair_scores: Vec<ChainPairScore>,
    residue_scores: Vec<ResidueScore>,
    structure: Arc<StructureData>,
    #[serde(skip)]
    pae: Arc<PaeMatrix>,
}

impl ScoreResult {
    pub(crate) fn new(
        config: ScoringConfig,
        chain_pair_scores: Vec<ChainPairScore>,
        residue_scores: Vec<ResidueScore>,
        structure: Arc<StructureData>,
        pae: Arc<PaeMatrix>,
    ) -> Self {
        Self {
            config,
            chain_pair_scores,
            residue_scores,
            structure,
            pae,
        }
    }

    /// Chain pairs ordered by the file order of their chains.
    pub fn chain_pair_scores(&self) -> &[ChainPairScore] {
        &self.chain_pair_scores
    }

    /// Looks up the entry for chains `a` and `b`, regardless of argument order.
    pub fn chain_pair(&self, a: &str, b: &str) -> Option<&ChainPairScore> {
        self.chain_pair_scores.iter().find(|score| score.connects(a, b))
    }

    /// Residue entries in file order.
    pub fn residue_scores(&self) -> &[ResidueScore] {
        &self.residue_scores
    }

    pub fn residue_score(&self, index: ResidueIndex) -> Option<&ResidueScore> {
        self.residue_scores
            .binary_search_by_key(&index, |score| score.index)
            .ok()
            .map(|pos| &self.residue_scores[pos])
    }

    pub fn structure(&self) -> &Arc<StructureData> {
        &self.structure
    }

    pub fn pae_matrix(&self) -> &Arc<PaeMatrix> {
        &self.pae
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Number of chain pairs with at least one qualifying residue pair.
    pub fn interacting_pair_count(&self) -> usize {
        self.chain_pair_scores
            .iter()
            .filter(|score| score.is_interacting())
            .count()
    }

    /// Returns a copy without the chain pairs and residues that have no qualifying pair.
    pub fn interacting_only(&self) -> Self {
        Self {
            config: self.config,
            chain_pair_scores: self
                .chain_pair_scores
                .iter()
                .filter(|score| score.is_interacting())
                .cloned()
                .collect(),
            residue_scores: self
                .residue_scores
                .iter()
                .filter(|score| score.is_interacting())
                .copied()
                .collect(),
            structure: Arc::clone(&self.structure),
            pae: Arc::clone(&self.pae),
        }
    }
}
