use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "ipSAE CLI - Score predicted protein complex interfaces from PAE and CA coordinates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single structure against its PAE file.
    Score(ScoreArgs),
    /// Find structure/PAE pairs under a directory and score each of them.
    Scan(ScanArgs),
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the predicted structure (.pdb, .ent, .cif, .mmcif; optionally .gz).
    #[arg(long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Path to the PAE file (.json or .npz; optionally .gz).
    #[arg(long, required = true, value_name = "PATH")]
    pub pae: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to search recursively for predictions.
    #[arg(required = true, value_name = "DIR")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Cutoff and output options shared by every scoring command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Maximum predicted aligned error for a residue pair to count.
    #[arg(long, value_name = "FLOAT")]
    pub pae_cutoff: Option<f64>,

    /// Maximum CA-CA distance in Ångström for a residue pair to count.
    #[arg(long, value_name = "FLOAT")]
    pub dist_cutoff: Option<f64>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S pae-cutoff=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    /// Directory that receives the report files.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
