//! Status command implementation

use anyhow::Result;
use log::warn;

use crate::config::AppConfig;
use crate::services::{BoardDiscovery, ReconnectMatch, find_reconnect_target};

pub async fn execute_status_command(config: &AppConfig) -> Result<()> {
    let service = super::load_service(config).await;

    let Some(last_valid) = service.last_valid() else {
        println!("📋 No board remembered yet");
        println!("💡 Select one with: boardsync select --name <NAME> --fqbn <FQBN> --port <PORT>");
        return Ok(());
    };

    println!("💾 Remembered: {}", last_valid);

    let boards = match super::serial_discovery(config).attached_boards().await {
        Ok(boards) => boards,
        Err(e) => {
            warn!("Board discovery failed: {}", e);
            println!("⚠️  Could not enumerate serial ports: {}", e);
            return Ok(());
        }
    };

    match find_reconnect_target(last_valid, &boards) {
        Some((selection, ReconnectMatch::Exact)) => {
            println!("✅ Attached on the same port: {}", selection)
        }
        Some((selection, ReconnectMatch::PortChanged)) => {
            println!("🔄 Attached on a different port: {}", selection)
        }
        None => println!("❌ Not attached ({} other board(s) present)", boards.len()),
    }

    Ok(())
}
