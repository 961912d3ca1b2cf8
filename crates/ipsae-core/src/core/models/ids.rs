use serde::Serialize;
use std::fmt;

/// Position of a residue in the concatenated, file-ordered residue list.
///
/// The same value addresses a residue in [`StructureData`](super::structure::StructureData)
/// and the matching row/column of a [`PaeMatrix`](super::pae::PaeMatrix). Values are handed
/// out by the structure builder and never renumbered afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResidueIndex(usize);

impl ResidueIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResidueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResidueIndex> for usize {
    fn from(index: ResidueIndex) -> Self {
        index.0
    }
}
