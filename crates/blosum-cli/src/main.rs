mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialConfig;
use crate::error::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("BLOSUM CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = PartialConfig::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command_result = match cli.command {
        Commands::Score(args) => {
            info!("Dispatching to 'score' command.");
            commands::lookup::run_score(args, &config, &mut out)
        }
        Commands::Row(args) => {
            info!("Dispatching to 'row' command.");
            commands::lookup::run_row(args, &config, &mut out)
        }
        Commands::Keys(args) => {
            info!("Dispatching to 'keys' command.");
            commands::inspect::run_keys(args, &config, &mut out)
        }
        Commands::Show(args) => {
            info!("Dispatching to 'show' command.");
            commands::inspect::run_show(args, &config, &mut out)
        }
        Commands::Presets => {
            info!("Dispatching to 'presets' command.");
            commands::presets::run(&mut out)
        }
    };

    match &command_result {
        Ok(()) => {
            out.flush()?;
            info!("Command completed successfully.");
        }
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
