//! Boards command implementation - List attached serial boards

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::services::BoardDiscovery;

/// Execute the boards command to list attached boards
pub async fn execute_boards_command(config: &AppConfig) -> Result<()> {
    info!("Scanning for attached serial boards...");

    let boards = super::serial_discovery(config)
        .attached_boards()
        .await
        .context("Failed to enumerate serial ports")?;

    if boards.is_empty() {
        println!("⚠️  No boards detected");
        return Ok(());
    }

    println!("🔍 Attached Boards:");
    println!("==================\n");

    for board in &boards {
        println!("Port:  {}", board.port.as_deref().unwrap_or("-"));
        println!("  Name: {}", board.name);
        match &board.fqbn {
            Some(fqbn) => println!("  FQBN: {}", fqbn),
            None => println!("  FQBN: (no core installed)"),
        }
        println!();
    }

    println!("Total boards detected: {}", boards.len());
    Ok(())
}
