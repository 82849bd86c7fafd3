//! Command Line Interface module
//!
//! Argument parsing and the command implementations that drive the
//! selection service from a terminal.

pub mod args;
pub mod commands;

pub use args::*;

use anyhow::Result;

use crate::config::{AppConfig, default_config_path};
use crate::utils::logging;

/// Main CLI application runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.json_logs || cli.log_file.is_some() {
        logging::init_structured_logging(
            logging::level_from_flags(cli.verbose, cli.quiet),
            cli.log_file.as_deref(),
        )?;
    } else {
        logging::init_cli_logging(cli.verbose, cli.quiet)?;
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = AppConfig::load(&config_path)?;

    commands::execute_command(cli.command.clone(), &config, &config_path).await
}
