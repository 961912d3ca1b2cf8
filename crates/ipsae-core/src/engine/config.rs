use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAE_CUTOFF: f64 = 15.0;
pub const DEFAULT_DIST_CUTOFF: f64 = 15.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid {name}: {value} (must be a finite number greater than zero)")]
    InvalidCutoff { name: &'static str, value: f64 },
}

/// Inclusive thresholds deciding which cross-chain residue pairs qualify.
///
/// Both cutoffs are validated on construction, so a `ScoringConfig` in hand is
/// always usable by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringConfig {
    pae_cutoff: f64,
    dist_cutoff: f64,
}

impl ScoringConfig {
    /// Validates and bundles the two cutoffs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCutoff`] if either value is zero, negative, or not finite.
    pub fn new(pae_cutoff: f64, dist_cutoff: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            pae_cutoff: validate_cutoff("pae_cutoff", pae_cutoff)?,
            dist_cutoff: validate_cutoff("dist_cutoff", dist_cutoff)?,
        })
    }

    /// Maximum predicted aligned error, in the matrix's units.
    pub fn pae_cutoff(&self) -> f64 {
        self.pae_cutoff
    }

    /// Maximum CA–CA distance, in Ångström.
    pub fn dist_cutoff(&self) -> f64 {
        self.dist_cutoff
    }
}

fn validate_cutoff(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidCutoff { name, value })
    }
}

#[derive(Default)]
pub struct ScoringConfigBuilder {
    pae_cutoff: Option<f64>,
    dist_cutoff: Option<f64>,
}

impl ScoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pae_cutoff(mut self, cutoff: f64) -> Self {
        self.pae_cutoff = Some(cutoff);
        self
    }
    pub fn dist_cutoff(mut self, cutoff: f64) -> Self {
        self.dist_cutoff = Some(cutoff);
        self
    }

    pub fn build(self) -> Result<ScoringConfig, ConfigError> {
        ScoringConfig::new(
            self.pae_cutoff
                .ok_or(ConfigError::MissingParameter("pae_cutoff"))?,
            self.dist_cutoff
                .ok_or(ConfigError::MissingParameter("dist_cutoff"))?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_config_with_both_cutoffs() {
        let config = ScoringConfigBuilder::new()
            .pae_cutoff(10.0)
            .dist_cutoff(8.0)
            .build()
            .unwrap();
        assert_eq!(config.pae_cutoff(), 10.0);
        assert_eq!(config.dist_cutoff(), 8.0);
    }

    #[test]
    fn builder_reports_missing_parameters() {
        let err = ScoringConfigBuilder::new().dist_cutoff(8.0).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("pae_cutoff"));

        let err = ScoringConfigBuilder::new().pae_cutoff(8.0).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("dist_cutoff"));
    }

    #[test]
    fn zero_negative_and_non_finite_cutoffs_are_rejected() {
        for bad in [0.0, -1.0, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                ScoringConfig::new(bad, 15.0),
                Err(ConfigError::InvalidCutoff { name: "pae_cutoff", value: bad })
            );
            assert_eq!(
                ScoringConfig::new(15.0, bad),
                Err(ConfigError::InvalidCutoff { name: "dist_cutoff", value: bad })
            );
        }
        assert!(matches!(
            ScoringConfig::new(f64::NAN, 15.0),
            Err(ConfigError::InvalidCutoff { name: "pae_cutoff", .. })
        ));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ScoringConfig::new(DEFAULT_PAE_CUTOFF, DEFAULT_DIST_CUTOFF).is_ok());
    }
}
