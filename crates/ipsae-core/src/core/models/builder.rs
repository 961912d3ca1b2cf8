use super::chain::Chain;
use super::ids::ResidueIndex;
use super::residue::Residue;
use super::structure::StructureData;
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};

/// Incrementally assembles a [`StructureData`] from representative (CA) atoms.
///
/// Each call to [`add_residue`](Self::add_residue) appends a residue together with its
/// coordinate, so the two sequences can never drift apart. Chains are registered in
/// first-seen order and repeated chain identifiers are merged into a single entry.
#[derive(Debug, Default)]
pub struct StructureBuilder {
    structure: StructureData,

    // --- Builder-specific state for efficient construction ---
    chain_id_map: HashMap<String, usize>,
    seen_residues: HashSet<(String, isize, Option<char>)>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a residue and its representative coordinate.
    ///
    /// Returns `None` without modifying the structure when the residue key
    /// `(chain, number, insertion code)` was already added; alternate locations and
    /// duplicated records therefore keep the first coordinate seen.
    pub fn add_residue(
        &mut self,
        chain_id: &str,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        position: Point3<f64>,
    ) -> Option<ResidueIndex> {
        if !self
            .seen_residues
            .insert((chain_id.to_string(), number, insertion_code))
        {
            return None;
        }

        let chain_idx = *self
            .chain_id_map
            .entry(chain_id.to_string())
            .or_insert_with(|| {
                let index = self.structure.chains.len();
                self.structure.chains.push(Chain::new(chain_id));
                index
            });

        let index = ResidueIndex::new(self.structure.residues.len());
        self.structure
            .residues
            .push(Residue::new(index, chain_id, number, insertion_code, name));
        self.structure.coordinates.push(position);
        self.structure.chains[chain_idx].residues.push(index);
        Some(index)
    }

    pub fn residue_count(&self) -> usize {
        self.structure.residues.len()
    }

    pub fn build(self) -> StructureData {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residues_and_coordinates_grow_together() {
        let mut builder = StructureBuilder::new();
        builder.add_residue("A", 1, None, "MET", Point3::new(0.0, 0.0, 0.0));
        builder.add_residue("A", 2, None, "LYS", Point3::new(3.8, 0.0, 0.0));
        builder.add_residue("B", 1, None, "GLY", Point3::new(0.0, 3.8, 0.0));
        let structure = builder.build();

        assert_eq!(structure.residues().len(), 3);
        assert_eq!(structure.coordinates().len(), 3);
        assert_eq!(structure.coordinates()[1], Point3::new(3.8, 0.0, 0.0));
    }

    #[test]
    fn repeated_chain_ids_are_merged_in_first_seen_order() {
        let mut builder = StructureBuilder::new();
        builder.add_residue("B", 1, None, "ALA", Point3::origin());
        builder.add_residue("A", 1, None, "ALA", Point3::origin());
        builder.add_residue("B", 2, None, "ALA", Point3::origin());
        let structure = builder.build();

        let ids: Vec<&str> = structure.chain_ids().collect();
        assert_eq!(ids, vec!["B", "A"]);
        let chain_b = structure.chain("B").unwrap();
        assert_eq!(
            chain_b.residues(),
            &[ResidueIndex::new(0), ResidueIndex::new(2)]
        );
    }

    #[test]
    fn duplicate_residue_keys_keep_the_first_coordinate() {
        let mut builder = StructureBuilder::new();
        let first = builder.add_residue("A", 5, None, "SER", Point3::new(1.0, 1.0, 1.0));
        let second = builder.add_residue("A", 5, None, "SER", Point3::new(9.0, 9.0, 9.0));
        let inserted = builder.add_residue("A", 5, Some('A'), "SER", Point3::new(2.0, 2.0, 2.0));

        assert_eq!(first, Some(ResidueIndex::new(0)));
        assert_eq!(second, None);
        assert_eq!(inserted, Some(ResidueIndex::new(1)));

        let structure = builder.build();
        assert_eq!(structure.coordinates()[0], Point3::new(1.0, 1.0, 1.0));
    }
}
