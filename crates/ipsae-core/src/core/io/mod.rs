//! Provides input functionality for predicted-structure and PAE files.
//!
//! Coordinate files (PDB, mmCIF) are reduced to one alpha-carbon per residue, and
//! predicted-aligned-error containers (JSON, NPZ) are reduced to a square matrix.
//! Every reader accepts a trailing `.gz` and decompresses it transparently. The
//! [`format`] module picks a reader from the file name.

pub mod cif;
pub mod error;
pub mod format;
pub(crate) mod npy;
pub mod pae;
pub mod pdb;
pub mod traits;

/// Atom name kept as the single representative of each residue.
pub(crate) const REPRESENTATIVE_ATOM: &str = "CA";

/// Whether an atom named `CA` is a calcium ion rather than an alpha-carbon.
///
/// The element column decides when present; otherwise a residue named `CA` is
/// taken to be the ion.
pub(crate) fn is_calcium(element: &str, residue_name: &str) -> bool {
    if element.is_empty() {
        residue_name.eq_ignore_ascii_case("CA")
    } else {
        element.eq_ignore_ascii_case("CA")
    }
}
