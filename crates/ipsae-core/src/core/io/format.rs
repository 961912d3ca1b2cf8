use super::cif::MmcifFile;
use super::error::{ParseError, ParseErrorKind};
use super::pae::{JsonPaeFile, NpzPaeFile};
use super::pdb::PdbFile;
use super::traits::{PaeFile, StructureFile, is_gzipped};
use crate::core::models::pae::PaeMatrix;
use crate::core::models::structure::StructureData;
use std::path::Path;

/// Extension of `path` after removing a trailing `.gz`, lowercased.
fn inner_extension(path: &Path) -> String {
    let stem_path;
    let path = if is_gzipped(path) {
        stem_path = path.with_extension("");
        stem_path.as_path()
    } else {
        path
    };
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

fn unsupported(path: &Path) -> ParseError {
    let extension = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .and_then(|name| name.split_once('.').map(|(_, ext)| ext.to_string()))
        .unwrap_or_default();
    ParseError::new(path, ParseErrorKind::UnsupportedFormat { extension })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

impl StructureFormat {
    /// Chooses a reader from the file name; `.gz` suffixes are looked through.
    pub fn from_path(path: &Path) -> Option<Self> {
        match inner_extension(path).as_str() {
            "pdb" | "ent" => Some(Self::Pdb),
            "cif" | "mmcif" => Some(Self::Mmcif),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaeFormat {
    Json,
    Npz,
}

impl PaeFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match inner_extension(path).as_str() {
            "json" => Some(Self::Json),
            "npz" => Some(Self::Npz),
            _ => None,
        }
    }
}

/// Loads the CA-only structure of the first model in a PDB or mmCIF file.
///
/// # Errors
///
/// Returns [`ParseErrorKind::UnsupportedFormat`] for unrecognized extensions and any
/// reader error otherwise, always tagged with `path`.
pub fn load_structure(path: impl AsRef<Path>) -> Result<StructureData, ParseError> {
    let path = path.as_ref();
    match StructureFormat::from_path(path) {
        Some(StructureFormat::Pdb) => PdbFile::read_from_path(path),
        Some(StructureFormat::Mmcif) => MmcifFile::read_from_path(path),
        None => Err(unsupported(path)),
    }
}

/// Loads a square PAE matrix from a JSON or NPZ file.
///
/// # Errors
///
/// Returns [`ParseErrorKind::UnsupportedFormat`] for unrecognized extensions and any
/// reader error otherwise, always tagged with `path`.
pub fn load_pae(path: impl AsRef<Path>) -> Result<PaeMatrix, ParseError> {
    let path = path.as_ref();
    match PaeFormat::from_path(path) {
        Some(PaeFormat::Json) => JsonPaeFile::read_from_path(path),
        Some(PaeFormat::Npz) => NpzPaeFile::read_from_path(path),
        None => Err(unsupported(path)),
    }
}
