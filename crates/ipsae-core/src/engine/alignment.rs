use crate::core::models::ids::ResidueIndex;
use crate::core::models::pae::PaeMatrix;
use crate::core::models::structure::StructureData;
use nalgebra::Point3;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "Structure has {residues} CA residues but the PAE matrix is {pae_dimension}x{pae_dimension}"
)]
pub struct DimensionMismatchError {
    pub residues: usize,
    pub pae_dimension: usize,
}

/// A structure and a PAE matrix known to describe the same residues in the same order.
///
/// Residue `i` of the structure is row and column `i` of the matrix. Every
/// [`ResidueIndex`] handed out here is valid for both, which is what lets the scoring
/// loop index without bounds failures.
#[derive(Debug, Clone)]
pub struct AlignedComplex {
    structure: Arc<StructureData>,
    pae: Arc<PaeMatrix>,
}

/// Pairs a structure with its PAE matrix after checking their sizes agree.
///
/// Nothing is reordered: residue order as parsed is authoritative.
///
/// # Errors
///
/// Returns [`DimensionMismatchError`] if the residue count differs from the matrix dimension.
pub fn align(
    structure: impl Into<Arc<StructureData>>,
    pae: impl Into<Arc<PaeMatrix>>,
) -> Result<AlignedComplex, DimensionMismatchError> {
    let structure = structure.into();
    let pae = pae.into();
    if structure.residue_count() != pae.dimension() {
        return Err(DimensionMismatchError {
            residues: structure.residue_count(),
            pae_dimension: pae.dimension(),
        });
    }
    debug!(
        "Aligned {} residues with a {n}x{n} PAE matrix.",
        structure.residue_count(),
        n = pae.dimension()
    );
    Ok(AlignedComplex { structure, pae })
}

impl AlignedComplex {
    pub fn structure(&self) -> &Arc<StructureData> {
        &self.structure
    }

    pub fn pae(&self) -> &Arc<PaeMatrix> {
        &self.pae
    }

    pub fn len(&self) -> usize {
        self.structure.residue_count()
    }

    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    /// Every shared index, in file order.
    pub fn indices(&self) -> impl Iterator<Item = ResidueIndex> + '_ {
        self.structure.residue_indices()
    }

    /// CA coordinate of residue `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` did not come from this complex.
    #[inline]
    pub fn position(&self, index: ResidueIndex) -> &Point3<f64> {
        &self.structure.coordinates()[index.get()]
    }

    /// Symmetric pair error of `{i, j}`; see [`PaeMatrix::pair_error`].
    #[inline]
    pub fn pair_error(&self, i: ResidueIndex, j: ResidueIndex) -> f64 {
        self.pae.pair_error(i, j)
    }
}
