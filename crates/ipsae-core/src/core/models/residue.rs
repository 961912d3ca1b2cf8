use super::ids::ResidueIndex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Residue {
    pub index: ResidueIndex,             // Shared structure/PAE position
    pub chain_id: String,                // Identifier of the parent chain
    pub number: isize,                   // Residue sequence number from source file
    pub insertion_code: Option<char>,    // PDB insertion code, if any
    pub name: String,                    // Name of the residue (e.g., "ALA", "GLY")
}

impl Residue {
    pub(crate) fn new(
        index: ResidueIndex,
        chain_id: &str,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Self {
        Self {
            index,
            chain_id: chain_id.to_string(),
            number,
            insertion_code,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain_id, self.name, self.number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}
