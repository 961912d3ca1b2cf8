use super::error::{ParseErrorKind, RecordError};
use super::traits::StructureFile;
use super::{REPRESENTATIVE_ATOM, is_calcium};
use crate::core::models::builder::StructureBuilder;
use crate::core::models::structure::StructureData;
use nalgebra::Point3;
use std::io::BufRead;
use tracing::debug;

const MIN_COORDINATE_LINE_LEN: usize = 54;
const DEFAULT_CHAIN_ID: &str = "A";

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_float(line_num: usize, field: &'static str, value: &str) -> Result<f64, ParseErrorKind> {
    value.parse().map_err(|_| ParseErrorKind::Record {
        line: line_num,
        reason: RecordError::InvalidFloat {
            field,
            value: value.into(),
        },
    })
}

/// Legacy PDB coordinate reader.
///
/// Reads ATOM/HETATM records of the first model and keeps the first `CA` atom of
/// each residue. Residues without a `CA` atom are skipped silently.
pub struct PdbFile;

impl StructureFile for PdbFile {
    fn read_from(reader: &mut impl BufRead) -> Result<StructureData, ParseErrorKind> {
        let mut builder = StructureBuilder::new();
        let mut atom_records = 0usize;
        let mut residue_keys = std::collections::HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_COORDINATE_LINE_LEN {
                        return Err(ParseErrorKind::Record {
                            line: line_num,
                            reason: RecordError::LineTooShort,
                        });
                    }
                    atom_records += 1;

                    let atom_name = slice_and_trim(&line, 12, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_str = slice_and_trim(&line, 21, 22);
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = line.get(26..27).and_then(|s| s.chars().next());
                    let element = slice_and_trim(&line, 76, 78);

                    let chain_id = if chain_str.is_empty() {
                        DEFAULT_CHAIN_ID
                    } else {
                        chain_str
                    };
                    if res_seq_str.is_empty() {
                        return Err(ParseErrorKind::Record {
                            line: line_num,
                            reason: RecordError::MissingValue {
                                field: "residue number (columns 23-26)",
                            },
                        });
                    }
                    let res_seq: isize = res_seq_str.parse().map_err(|_| ParseErrorKind::Record {
                        line: line_num,
                        reason: RecordError::InvalidInt {
                            field: "residue number (columns 23-26)",
                            value: res_seq_str.into(),
                        },
                    })?;
                    let insertion_code = insertion_code.filter(|c| !c.is_whitespace());
                    residue_keys.insert((chain_id.to_string(), res_seq, insertion_code));

                    if atom_name != REPRESENTATIVE_ATOM || is_calcium(element, res_name) {
                        continue;
                    }

                    let coordinate = |field, start, end| {
                        parse_float(line_num, field, slice_and_trim(&line, start, end))
                    };
                    let x = coordinate("x (columns 31-38)", 30, 38)?;
                    let y = coordinate("y (columns 39-46)", 38, 46)?;
                    let z = coordinate("z (columns 47-54)", 46, 54)?;

                    builder.add_residue(
                        chain_id,
                        res_seq,
                        insertion_code,
                        res_name,
                        Point3::new(x, y, z),
                    );
                }
                "ENDMDL" if atom_records > 0 => break,
                "END" => break,
                _ => {}
            }
        }

        if atom_records == 0 {
            return Err(ParseErrorKind::NoAtoms);
        }

        let structure = builder.build();
        debug!(
            "PDB: {} CA residues in {} chain(s); {} residue(s) without CA skipped.",
            structure.residue_count(),
            structure.chains().len(),
            residue_keys.len().saturating_sub(structure.residue_count())
        );
        Ok(structure)
    }
}
