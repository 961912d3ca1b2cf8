use std::fs;
use std::path::{Path, PathBuf};

fn atom_line(serial: usize, res: &str, chain: &str, seq: isize, xyz: [f64; 3]) -> String {
    format!(
        "ATOM  {:>5}  CA  {:>3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00 90.00           C",
        serial, res, chain, seq, xyz[0], xyz[1], xyz[2]
    )
}

/// Two chains of two residues; A1, A2 and B1 sit close together, B2 is far away.
pub fn dimer_pdb() -> String {
    [
        atom_line(1, "MET", "A", 1, [0.0, 0.0, 0.0]),
        atom_line(2, "LYS", "A", 2, [3.8, 0.0, 0.0]),
        atom_line(3, "GLY", "B", 1, [0.0, 5.0, 0.0]),
        atom_line(4, "SER", "B", 2, [30.0, 30.0, 30.0]),
        "END".to_string(),
    ]
    .join("\n")
}

pub const DIMER_PAE_JSON: &str = r#"{"pae": [
    [0.0, 1.0, 4.0, 20.0],
    [1.0, 0.0, 6.0, 20.0],
    [2.0, 8.0, 0.0, 1.0],
    [20.0, 20.0, 1.0, 0.0]
]}"#;

/// Writes the dimer structure and its PAE file under `dir` with the given names.
pub fn write_dimer(dir: &Path, structure_name: &str, pae_name: &str) -> (PathBuf, PathBuf) {
    let structure = dir.join(structure_name);
    let pae = dir.join(pae_name);
    if let Some(parent) = structure.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    if let Some(parent) = pae.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&structure, dimer_pdb()).unwrap();
    fs::write(&pae, DIMER_PAE_JSON).unwrap();
    (structure, pae)
}
