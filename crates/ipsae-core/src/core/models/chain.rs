use super::ids::ResidueIndex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub id: String,                          // Chain identifier as written in the file (e.g., "A")
    pub(crate) residues: Vec<ResidueIndex>, // Residues of this chain, in file order
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueIndex] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
