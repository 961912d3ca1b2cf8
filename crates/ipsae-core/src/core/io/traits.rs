use super::error::{ParseError, ParseErrorKind};
use crate::core::models::pae::PaeMatrix;
use crate::core::models::structure::StructureData;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading coordinate file formats.
///
/// Implementors parse a single model from the stream and reduce it to the
/// CA-only [`StructureData`] representation.
pub trait StructureFile {
    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read, contains malformed records,
    /// or holds no atom records at all.
    fn read_from(reader: &mut impl BufRead) -> Result<StructureData, ParseErrorKind>;

    /// Reads a structure from a file path, decompressing `.gz` files transparently.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Return
    ///
    /// Returns the parsed structure.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming `path` if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<StructureData, ParseError> {
        let path = path.as_ref();
        let mut reader = open_input(path).map_err(|e| ParseError::new(path, e))?;
        Self::read_from(&mut reader).map_err(|kind| ParseError::new(path, kind))
    }
}

/// Defines the interface for reading predicted-aligned-error containers.
pub trait PaeFile {
    /// Reads a PAE matrix from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the square PAE matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails, no matrix key is present, or the data
    /// cannot be shaped into a square matrix.
    fn read_from(reader: &mut impl BufRead) -> Result<PaeMatrix, ParseErrorKind>;

    /// Reads a PAE matrix from a file path, decompressing `.gz` files transparently.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming `path` if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PaeMatrix, ParseError> {
        let path = path.as_ref();
        let mut reader = open_input(path).map_err(|e| ParseError::new(path, e))?;
        Self::read_from(&mut reader).map_err(|kind| ParseError::new(path, kind))
    }
}

/// Opens `path` for buffered reading, inserting a gzip decoder when the file name ends in `.gz`.
///
/// The returned reader owns the file handle; dropping it releases the handle and the
/// decompression stream.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
