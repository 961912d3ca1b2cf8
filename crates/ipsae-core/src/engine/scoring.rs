use super::alignment::AlignedComplex;
use super::config::ScoringConfig;
use super::progress::{Progress, ProgressReporter};
use super::result::{ChainPairScore, Contact, ResidueScore, ScoreResult};
use crate::core::models::ids::ResidueIndex;
use std::sync::Arc;
use tracing::debug;

/// Running sums over qualifying pairs.
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    count: usize,
    confidence: f64,
    pae: f64,
    distance: f64,
}

impl Accumulator {
    fn add(&mut self, confidence: f64, pae: f64, distance: f64) {
        self.count += 1;
        self.confidence += confidence;
        self.pae += pae;
        self.distance += distance;
    }

    fn mean(&self, sum: f64) -> Option<f64> {
        (self.count > 0).then(|| sum / self.count as f64)
    }

    fn mean_confidence(&self) -> f64 {
        self.mean(self.confidence).unwrap_or(0.0)
    }
}

/// Scores every cross-chain residue pair of an aligned complex.
///
/// See [`score_with_progress`] for the rules.
pub fn score(complex: &AlignedComplex, config: &ScoringConfig) -> ScoreResult {
    score_with_progress(complex, config, &ProgressReporter::new())
}

/// Scores every cross-chain residue pair of an aligned complex, reporting each scanned row.
///
/// A pair `{i, j}` of residues in different chains qualifies when its symmetric PAE
/// `max(PAE[i,j], PAE[j,i])` is at most `pae_cutoff` and its CA–CA distance is at most
/// `dist_cutoff`. Each qualifying pair has confidence `1 - pae / pae_cutoff`; chain-pair
/// and residue scores are the mean confidence of their qualifying pairs.
///
/// Pairs are visited with `i` ascending and `j > i` ascending, so repeated runs give
/// bit-identical results. The distance is only computed for pairs whose PAE qualifies.
pub fn score_with_progress(
    complex: &AlignedComplex,
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> ScoreResult {
    let structure = complex.structure();
    let chains = structure.chains();
    let n_chains = chains.len();
    let n = complex.len();

    let mut chain_of = vec![0usize; n];
    for (position, chain) in chains.iter().enumerate() {
        for index in chain.residues() {
            chain_of[index.get()] = position;
        }
    }

    let slot = |a: usize, b: usize| a * n_chains + b;
    let mut pair_sums = vec![Accumulator::default(); n_chains * n_chains];
    let mut pair_contacts: Vec<Vec<Contact>> = vec![Vec::new(); n_chains * n_chains];
    let mut residue_sums = vec![Accumulator::default(); n];

    let indices: Vec<ResidueIndex> = complex.indices().collect();
    let pae_cutoff = config.pae_cutoff();
    let dist_cutoff = config.dist_cutoff();

    reporter.report(Progress::ScanStart { residues: n as u64 });
    for (i, &first) in indices.iter().enumerate() {
        for (j, &second) in indices.iter().enumerate().skip(i + 1) {
            let (chain_i, chain_j) = (chain_of[i], chain_of[j]);
            if chain_i == chain_j {
                continue;
            }

            // Negated comparisons so that NaN never qualifies.
            let pae = complex.pair_error(first, second);
            if !(pae <= pae_cutoff) {
                continue;
            }
            let distance = nalgebra::distance(complex.position(first), complex.position(second));
            if !(distance <= dist_cutoff) {
                continue;
            }

            let confidence = 1.0 - pae / pae_cutoff;
            let key = slot(chain_i.min(chain_j), chain_i.max(chain_j));
            pair_sums[key].add(confidence, pae, distance);
            pair_contacts[key].push(Contact {
                first,
                second,
                pae,
                distance,
            });
            residue_sums[i].add(confidence, pae, distance);
            residue_sums[j].add(confidence, pae, distance);
        }
        reporter.report(Progress::ResidueScanned);
    }
    reporter.report(Progress::ScanFinish);

    let mut chain_pair_scores = Vec::with_capacity(n_chains * n_chains.saturating_sub(1) / 2);
    for (a, chain_a) in chains.iter().enumerate() {
        for (b, chain_b) in chains.iter().enumerate().skip(a + 1) {
            let key = slot(a, b);
            let sums = pair_sums[key];
            let possible = chain_a.len() * chain_b.len();
            chain_pair_scores.push(ChainPairScore {
                chain_a: chain_a.id.clone(),
                chain_b: chain_b.id.clone(),
                n_residues_a: chain_a.len(),
                n_residues_b: chain_b.len(),
                n_pairs: sums.count,
                ipsae: sums.mean_confidence(),
                mean_pae: sums.mean(sums.pae),
                mean_distance: sums.mean(sums.distance),
                contact_fraction: if possible > 0 {
                    sums.count as f64 / possible as f64
                } else {
                    0.0
                },
                contacts: std::mem::take(&mut pair_contacts[key]),
            });
        }
    }

    let residue_scores: Vec<ResidueScore> = indices
        .iter()
        .zip(&residue_sums)
        .map(|(&index, sums)| ResidueScore {
            index,
            n_partners: sums.count,
            ipsae: sums.mean_confidence(),
            mean_pae: sums.mean(sums.pae),
            mean_distance: sums.mean(sums.distance),
        })
        .collect();

    for pair in &chain_pair_scores {
        debug!(
            "Chain pair {}-{}: {} qualifying pair(s), ipSAE {:.4}.",
            pair.chain_a, pair.chain_b, pair.n_pairs, pair.ipsae
        );
    }

    ScoreResult::new(
        *config,
        chain_pair_scores,
        residue_scores,
        Arc::clone(structure),
        Arc::clone(complex.pae()),
    )
}
