use thiserror::Error;

use super::alignment::DimensionMismatchError;
use super::config::ConfigError;
use crate::core::io::error::ParseError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatchError),

    #[error("Invalid scoring configuration: {0}")]
    Config(#[from] ConfigError),
}
