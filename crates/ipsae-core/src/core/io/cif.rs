use super::error::{ParseErrorKind, RecordError};
use super::traits::StructureFile;
use super::{REPRESENTATIVE_ATOM, is_calcium};
use crate::core::models::builder::StructureBuilder;
use crate::core::models::structure::StructureData;
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::BufRead;
use tracing::debug;

const ATOM_SITE_PREFIX: &str = "_atom_site.";

fn is_null(value: &str) -> bool {
    value == "." || value == "?"
}

/// Splits one mmCIF line into tokens, honoring quoted strings and trailing comments.
///
/// A quote only closes a token when followed by whitespace or the end of the line,
/// so values like `O5'` or `"N1'"` survive intact.
fn tokenize(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'#' {
            break;
        }
        if c == b'\'' || c == b'"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() {
                if bytes[end] == c
                    && (end + 1 == bytes.len() || bytes[end + 1].is_ascii_whitespace())
                {
                    break;
                }
                end += 1;
            }
            tokens.push(line[start..end.min(bytes.len())].to_string());
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(line[start..i].to_string());
        }
    }
    tokens
}

/// Positions of the `_atom_site` columns this reader consumes.
#[derive(Debug)]
struct AtomSiteColumns {
    atom_name: usize,
    residue_name: usize,
    chain: usize,
    seq: usize,
    insertion_code: Option<usize>,
    element: Option<usize>,
    model: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    count: usize,
}

impl AtomSiteColumns {
    fn resolve(tags: &[String]) -> Result<Self, ParseErrorKind> {
        let find = |name: &str| {
            tags.iter().position(|tag| {
                tag.get(ATOM_SITE_PREFIX.len()..)
                    .is_some_and(|field| field.eq_ignore_ascii_case(name))
            })
        };
        let preferred = |auth: &str, label: &str| {
            find(auth)
                .or_else(|| find(label))
                .ok_or_else(|| ParseErrorKind::MissingField(format!("{ATOM_SITE_PREFIX}{label}")))
        };
        let required = |name: &str| {
            find(name)
                .ok_or_else(|| ParseErrorKind::MissingField(format!("{ATOM_SITE_PREFIX}{name}")))
        };

        Ok(Self {
            atom_name: preferred("auth_atom_id", "label_atom_id")?,
            residue_name: preferred("auth_comp_id", "label_comp_id")?,
            chain: preferred("auth_asym_id", "label_asym_id")?,
            seq: preferred("auth_seq_id", "label_seq_id")?,
            insertion_code: find("pdbx_PDB_ins_code"),
            element: find("type_symbol"),
            model: find("pdbx_PDB_model_num"),
            x: required("Cartn_x")?,
            y: required("Cartn_y")?,
            z: required("Cartn_z")?,
            count: tags.len(),
        })
    }
}

struct AtomSiteReader {
    columns: AtomSiteColumns,
    builder: StructureBuilder,
    first_model: Option<String>,
    rows: usize,
    residue_keys: HashSet<(String, String, String)>,
}

impl AtomSiteReader {
    fn new(columns: AtomSiteColumns) -> Self {
        Self {
            columns,
            builder: StructureBuilder::new(),
            first_model: None,
            rows: 0,
            residue_keys: HashSet::new(),
        }
    }

    fn push_row(&mut self, row: &[String], line: usize) -> Result<(), ParseErrorKind> {
        self.rows += 1;
        let cols = &self.columns;
        let field = |idx: usize| row[idx].as_str();
        let optional = |idx: Option<usize>| idx.map(|i| row[i].as_str()).filter(|v| !is_null(v));
        let record_err = |reason: RecordError| ParseErrorKind::Record { line, reason };

        if let Some(model) = optional(cols.model) {
            match &self.first_model {
                None => self.first_model = Some(model.to_string()),
                Some(first) if first != model => return Ok(()),
                Some(_) => {}
            }
        }

        let chain_id = field(cols.chain);
        let seq_str = field(cols.seq);
        let insertion_code = optional(cols.insertion_code);
        self.residue_keys.insert((
            chain_id.to_string(),
            seq_str.to_string(),
            insertion_code.unwrap_or_default().to_string(),
        ));

        let residue_name = field(cols.residue_name);
        let element = optional(cols.element).unwrap_or("");
        if field(cols.atom_name) != REPRESENTATIVE_ATOM || is_calcium(element, residue_name) {
            return Ok(());
        }

        if is_null(chain_id) {
            return Err(record_err(RecordError::MissingValue { field: "_atom_site.auth_asym_id" }));
        }
        if is_null(seq_str) {
            return Err(record_err(RecordError::MissingValue { field: "_atom_site.auth_seq_id" }));
        }
        let number: isize = seq_str.parse().map_err(|_| {
            record_err(RecordError::InvalidInt {
                field: "_atom_site.auth_seq_id",
                value: seq_str.into(),
            })
        })?;
        let coordinate = |idx: usize, name: &'static str| -> Result<f64, ParseErrorKind> {
            let value = field(idx);
            value.parse().map_err(|_| {
                record_err(RecordError::InvalidFloat {
                    field: name,
                    value: value.into(),
                })
            })
        };
        let position = Point3::new(
            coordinate(cols.x, "_atom_site.Cartn_x")?,
            coordinate(cols.y, "_atom_site.Cartn_y")?,
            coordinate(cols.z, "_atom_site.Cartn_z")?,
        );

        self.builder.add_residue(
            chain_id,
            number,
            insertion_code.and_then(|code| code.chars().next()),
            residue_name,
            position,
        );
        Ok(())
    }
}

/// PDBx/mmCIF coordinate reader.
///
/// Consumes the first `_atom_site` loop of the file, preferring author (`auth_*`)
/// identifiers over label identifiers, and keeps the first `CA` atom of each residue
/// in the first model.
pub struct MmcifFile;

impl StructureFile for MmcifFile {
    fn read_from(reader: &mut impl BufRead) -> Result<StructureData, ParseErrorKind> {
        let mut tags: Vec<String> = Vec::new();
        let mut collecting_tags = false;
        let mut atom_site: Option<AtomSiteReader> = None;
        let mut row: Vec<String> = Vec::new();
        let mut row_start = 0usize;
        let mut text_field: Option<(usize, String)> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if let Some((_, text)) = text_field.as_mut() {
                if line.starts_with(';') {
                    let value = std::mem::take(text);
                    text_field = None;
                    if row.is_empty() {
                        row_start = line_num;
                    }
                    row.push(value);
                } else {
                    text.push('\n');
                    text.push_str(&line);
                }
                continue;
            }

            let trimmed = line.trim();
            if collecting_tags {
                if trimmed.starts_with('_') {
                    if let Some(tag) = trimmed.split_whitespace().next() {
                        tags.push(tag.to_string());
                    }
                    continue;
                }
                collecting_tags = false;
                if tags.first().is_some_and(|t| t.starts_with(ATOM_SITE_PREFIX)) {
                    atom_site = Some(AtomSiteReader::new(AtomSiteColumns::resolve(&tags)?));
                }
            }

            let Some(site) = atom_site.as_mut() else {
                if trimmed.starts_with("loop_") {
                    collecting_tags = true;
                    tags.clear();
                }
                continue;
            };

            if trimmed.starts_with("loop_")
                || trimmed.starts_with('_')
                || trimmed.starts_with("data_")
            {
                break;
            }
            if line.starts_with(';') {
                text_field = Some((line_num, line[1..].to_string()));
                continue;
            }

            for token in tokenize(&line) {
                if row.is_empty() {
                    row_start = line_num;
                }
                row.push(token);
                if row.len() == site.columns.count {
                    site.push_row(&row, row_start)?;
                    row.clear();
                }
            }
        }

        if let Some((line, _)) = text_field {
            return Err(ParseErrorKind::Record {
                line,
                reason: RecordError::UnterminatedText,
            });
        }

        let Some(site) = atom_site else {
            return Err(ParseErrorKind::NoAtoms);
        };
        if !row.is_empty() {
            return Err(ParseErrorKind::Record {
                line: row_start,
                reason: RecordError::ColumnCount {
                    expected: site.columns.count,
                    found: row.len(),
                },
            });
        }
        if site.rows == 0 {
            return Err(ParseErrorKind::NoAtoms);
        }

        let skipped = site.residue_keys.len();
        let structure = site.builder.build();
        debug!(
            "mmCIF: {} CA residues in {} chain(s); {} residue(s) without CA skipped.",
            structure.residue_count(),
            structure.chains().len(),
            skipped.saturating_sub(structure.residue_count())
        );
        Ok(structure)
    }
}
