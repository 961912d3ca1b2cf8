mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod report;
mod scanner;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("ipSAE CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = match cli.command {
        Commands::Score(args) => {
            info!("Dispatching to 'score' command.");
            commands::score::run(args).map(|_| ())
        }
        Commands::Scan(args) => {
            info!("Dispatching to 'scan' command.");
            commands::scan::run(args).map(|_| ())
        }
    };

    match &command_result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
