//! CLI command implementations

pub mod boards;
pub mod check;
pub mod config;
pub mod select;
pub mod status;
pub mod watch;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::args::Commands;
use crate::config::AppConfig;
use crate::services::{BoardCatalog, BoardSelectionService, SerialPortDiscovery};
use crate::storage::FileStore;

/// Execute a CLI command
pub async fn execute_command(command: Commands, config: &AppConfig, config_path: &Path) -> Result<()> {
    match command {
        Commands::Boards => boards::execute_boards_command(config).await,
        Commands::Status => status::execute_status_command(config).await,
        Commands::Select { name, fqbn, port } => {
            select::execute_select_command(config, name, fqbn, port).await
        }
        Commands::Check { action } => check::execute_check_command(config, action).await,
        Commands::Watch { interval_ms } => watch::execute_watch_command(config, interval_ms).await,
        Commands::Config { force } => config::execute_config_command(config_path, force).await,
    }
}

/// Serial discovery configured from `config`
pub(crate) fn serial_discovery(config: &AppConfig) -> SerialPortDiscovery {
    SerialPortDiscovery::new(BoardCatalog::with_extra(&config.catalog))
        .include_non_usb(config.discovery.include_non_usb)
}

/// Selection service backed by the configured state file
pub(crate) async fn load_service(config: &AppConfig) -> BoardSelectionService {
    let store = Arc::new(FileStore::new(config.storage.state_path()));
    log::debug!("Using state file {}", store.path().display());
    BoardSelectionService::load(store).await
}
