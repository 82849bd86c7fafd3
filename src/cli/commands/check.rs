//! Check command implementation - compile/upload readiness

use anyhow::Result;
use log::warn;

use crate::cli::args::CheckAction;
use crate::config::AppConfig;
use crate::models::SelectionConfig;
use crate::services::BoardDiscovery;

/// Run the readiness check for `action` against `selection`
pub fn check_selection(selection: &SelectionConfig, action: CheckAction) -> Result<String> {
    let message = match action {
        CheckAction::Compile => {
            let board = selection.compile_target()?;
            format!("Ready to compile for {}", board)
        }
        CheckAction::Upload => {
            let (board, port) = selection.upload_target()?;
            format!("Ready to upload to {} on {}", board.name, port)
        }
    };
    Ok(message)
}

pub async fn execute_check_command(config: &AppConfig, action: CheckAction) -> Result<()> {
    let mut service = super::load_service(config).await;
    let discovery = super::serial_discovery(config);

    let attached = async {
        discovery.attached_boards().await.unwrap_or_else(|e| {
            warn!("Board discovery failed: {}", e);
            Vec::new()
        })
    };
    if service.try_reconnect_pending(attached).await {
        println!("🔄 Restored selection: {}", service.selection());
    }

    let message = check_selection(service.selection(), action)?;
    println!("✅ {}", message);
    Ok(())
}
