use ipsae::engine::config::{DEFAULT_DIST_CUTOFF, DEFAULT_PAE_CUTOFF};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub pae_cutoff: f64,
    pub dist_cutoff: f64,
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            pae_cutoff: DEFAULT_PAE_CUTOFF,
            dist_cutoff: DEFAULT_DIST_CUTOFF,
            output_dir: PathBuf::from("output"),
        }
    }
}
