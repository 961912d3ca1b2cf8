use crate::core::models::pae::PaeMatrixError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load a structure or PAE file, tagged with the offending path.
#[derive(Debug, Error)]
#[error("Failed to parse '{path}': {kind}", path = path.display())]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(path: impl AsRef<Path>, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Unsupported file format (extension: '{extension}')")]
    UnsupportedFormat { extension: String },
    #[error("No atom records found")]
    NoAtoms,
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid record on line {line}: {reason}")]
    Record { line: usize, reason: RecordError },
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid container: {0}")]
    InvalidContainer(String),
    #[error("No PAE matrix found. Available keys: [{}]", .available.join(", "))]
    MissingPaeKey { available: Vec<String> },
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("NumPy array error: {0}")]
    Npy(String),
    #[error(transparent)]
    Matrix(#[from] PaeMatrixError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Required field {field} is empty")]
    MissingValue { field: &'static str },
    #[error("Line is too short for an ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("Expected {expected} values per row but found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Unterminated text field")]
    UnterminatedText,
}
