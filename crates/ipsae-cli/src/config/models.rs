use ipsae::engine::config::ScoringConfig;
use std::path::PathBuf;

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub output_dir: PathBuf,
}
