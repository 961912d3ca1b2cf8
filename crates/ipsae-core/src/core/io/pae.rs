use super::error::ParseErrorKind;
use super::npy::{NpyArray, read_npy};
use super::traits::PaeFile;
use crate::core::models::pae::{PaeMatrix, PaeMatrixError};
use serde_json::{Map, Value};
use std::io::{BufRead, Cursor, Read};
use tracing::debug;

/// JSON keys that may hold the matrix, in lookup priority.
pub const PAE_JSON_KEYS: [&str; 3] = ["pae_matrix", "predicted_aligned_error", "pae"];

/// NPZ members that may hold the matrix, in lookup priority.
pub const PAE_NPZ_MEMBERS: [&str; 2] = ["pae_matrix.npy", "pae_matrix"];

/// Reader for JSON score files written by AlphaFold, ColabFold, and AlphaFold 3.
///
/// Accepts a top-level object or the AlphaFold-DB layout of a one-element array
/// holding that object. The matrix may be nested rows or a flat row-major array.
pub struct JsonPaeFile;

impl PaeFile for JsonPaeFile {
    fn read_from(reader: &mut impl BufRead) -> Result<PaeMatrix, ParseErrorKind> {
        let root: Value = serde_json::from_reader(reader)?;
        let object = top_level_object(&root)?;

        let Some((key, value)) = PAE_JSON_KEYS
            .iter()
            .find_map(|key| object.get(*key).map(|value| (*key, value)))
        else {
            return Err(ParseErrorKind::MissingPaeKey {
                available: object.keys().cloned().collect(),
            });
        };

        let matrix = matrix_from_json(key, value)?;
        debug!("Read {n}x{n} PAE matrix from JSON key '{key}'.", n = matrix.dimension());
        Ok(matrix)
    }
}

fn top_level_object(root: &Value) -> Result<&Map<String, Value>, ParseErrorKind> {
    match root {
        Value::Object(map) => Ok(map),
        Value::Array(items) => match items.as_slice() {
            [Value::Object(map)] => Ok(map),
            _ => Err(ParseErrorKind::InvalidContainer(format!(
                "expected a single-object array at the top level, found {} element(s)",
                items.len()
            ))),
        },
        _ => Err(ParseErrorKind::InvalidContainer(
            "top-level JSON value must be an object".to_string(),
        )),
    }
}

fn number(key: &str, value: &Value, row: usize, column: usize) -> Result<f64, ParseErrorKind> {
    value.as_f64().ok_or_else(|| {
        ParseErrorKind::InvalidContainer(format!(
            "row {row}, column {column} of '{key}' is not a number (found {value})"
        ))
    })
}

fn matrix_from_json(key: &str, value: &Value) -> Result<PaeMatrix, ParseErrorKind> {
    let Value::Array(items) = value else {
        return Err(ParseErrorKind::InvalidContainer(format!("'{key}' is not an array")));
    };

    if items.first().is_some_and(Value::is_array) {
        let rows = items
            .iter()
            .enumerate()
            .map(|(i, row)| match row {
                Value::Array(cells) => cells
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| number(key, cell, i, j))
                    .collect::<Result<Vec<f64>, _>>(),
                _ => Err(ParseErrorKind::InvalidContainer(format!(
                    "row {i} of '{key}' is not an array"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PaeMatrix::from_rows(rows)?)
    } else {
        let n = items.len().isqrt().max(1);
        let flat = items
            .iter()
            .enumerate()
            .map(|(k, cell)| number(key, cell, k / n, k % n))
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(PaeMatrix::from_flat(flat)?)
    }
}

/// Reader for NumPy `.npz` archives holding a `pae_matrix` array.
pub struct NpzPaeFile;

impl PaeFile for NpzPaeFile {
    fn read_from(reader: &mut impl BufRead) -> Result<PaeMatrix, ParseErrorKind> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        for member in PAE_NPZ_MEMBERS {
            let payload = match archive.by_name(member) {
                Ok(mut file) => {
                    let mut payload = Vec::new();
                    file.read_to_end(&mut payload)?;
                    payload
                }
                Err(zip::result::ZipError::FileNotFound) => continue,
                Err(e) => return Err(e.into()),
            };
            let matrix = matrix_from_npy(read_npy(&payload)?)?;
            debug!("Read {n}x{n} PAE matrix from NPZ member '{member}'.", n = matrix.dimension());
            return Ok(matrix);
        }

        let mut available: Vec<String> = archive
            .file_names()
            .map(|name| name.strip_suffix(".npy").unwrap_or(name).to_string())
            .collect();
        available.sort();
        Err(ParseErrorKind::MissingPaeKey { available })
    }
}

fn matrix_from_npy(array: NpyArray) -> Result<PaeMatrix, ParseErrorKind> {
    match *array.shape.as_slice() {
        [_] => Ok(PaeMatrix::from_flat(array.data)?),
        [rows, columns] if rows == columns => {
            if array.fortran_order {
                Ok(PaeMatrix::from_column_major(rows, array.data)?)
            } else {
                Ok(PaeMatrix::from_flat(array.data)?)
            }
        }
        [rows, columns] => Err(PaeMatrixError::NotSquare { rows, columns }.into()),
        _ => Err(ParseErrorKind::Npy(format!(
            "expected a 1- or 2-dimensional array, found shape {:?}",
            array.shape
        ))),
    }
}
