use super::chain::Chain;
use super::ids::ResidueIndex;
use super::residue::Residue;
use nalgebra::Point3;
use serde::Serialize;

/// Normalized, CA-only view of a predicted complex.
///
/// Holds one entry per residue that has a resolved alpha-carbon, in file order,
/// alongside that atom's coordinate. Residues without a CA atom are omitted by the
/// loaders, so the residue count here is the count the PAE matrix must match.
///
/// Instances are produced by [`StructureBuilder`](super::builder::StructureBuilder)
/// and are read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructureData {
    pub(crate) chains: Vec<Chain>,
    pub(crate) residues: Vec<Residue>,
    pub(crate) coordinates: Vec<Point3<f64>>,
}

impl StructureData {
    /// Returns the chains in first-seen order.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Returns an iterator over the chain identifiers in first-seen order.
    pub fn chain_ids(&self) -> impl Iterator<Item = &str> {
        self.chains.iter().map(|c| c.id.as_str())
    }

    /// Finds a chain by its identifier.
    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Position of a chain in [`chains`](Self::chains).
    pub fn chain_position(&self, id: &str) -> Option<usize> {
        self.chains.iter().position(|c| c.id == id)
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, index: ResidueIndex) -> Option<&Residue> {
        self.residues.get(index.get())
    }

    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    pub fn coordinate(&self, index: ResidueIndex) -> Option<&Point3<f64>> {
        self.coordinates.get(index.get())
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Iterates over every residue index in file order.
    pub fn residue_indices(&self) -> impl Iterator<Item = ResidueIndex> + '_ {
        self.residues.iter().map(|r| r.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureBuilder;

    fn two_chain_structure() -> StructureData {
        let mut builder = StructureBuilder::new();
        builder.add_residue("A", 1, None, "MET", Point3::new(0.0, 0.0, 0.0));
        builder.add_residue("A", 2, None, "ALA", Point3::new(1.0, 0.0, 0.0));
        builder.add_residue("B", 7, None, "GLY", Point3::new(2.0, 0.0, 0.0));
        builder.build()
    }

    #[test]
    fn default_structure_is_empty() {
        let structure = StructureData::default();
        assert!(structure.is_empty());
        assert_eq!(structure.chains().len(), 0);
        assert_eq!(structure.residue_indices().count(), 0);
    }

    #[test]
    fn lookups_resolve_by_index_and_chain() {
        let structure = two_chain_structure();
        let idx = ResidueIndex::new(2);

        assert_eq!(structure.residue(idx).unwrap().name, "GLY");
        assert_eq!(
            structure.coordinate(idx),
            Some(&Point3::new(2.0, 0.0, 0.0))
        );
        assert_eq!(structure.chain_position("B"), Some(1));
        assert_eq!(structure.chain("A").unwrap().len(), 2);
        assert!(structure.chain("C").is_none());
        assert!(structure.residue(ResidueIndex::new(3)).is_none());
    }

    #[test]
    fn every_residue_chain_is_registered() {
        let structure = two_chain_structure();
        for residue in structure.residues() {
            assert!(structure.chain(&residue.chain_id).is_some());
        }
        assert_eq!(structure.residues().len(), structure.coordinates().len());
    }
}
