use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ScoringArgs;
use crate::error::{CliError, Result};
use ipsae::engine::config::ScoringConfigBuilder;

pub fn build_config(args: &ScoringArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let file_config = apply_set_values(file_config, &args.set_values)?;

    let pae_cutoff = args
        .pae_cutoff
        .or(file_config.pae_cutoff)
        .unwrap_or(defaults.pae_cutoff);
    let dist_cutoff = args
        .dist_cutoff
        .or(file_config.dist_cutoff)
        .unwrap_or(defaults.dist_cutoff);

    let scoring = ScoringConfigBuilder::new()
        .pae_cutoff(pae_cutoff)
        .dist_cutoff(dist_cutoff)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        scoring,
        output_dir: args.output_dir.clone().unwrap_or(defaults.output_dir),
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        let parse_float = || -> Result<f64> {
            value_str.parse().map_err(|_| {
                CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
            })
        };

        match key {
            "pae-cutoff" => config.pae_cutoff = Some(parse_float()?),
            "dist-cutoff" => config.dist_cutoff = Some(parse_float()?),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
