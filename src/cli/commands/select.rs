//! Select command implementation

use anyhow::Result;

use crate::config::AppConfig;
use crate::models::{Board, SelectionConfig};

/// Build the selection described by the command line flags
pub fn selection_from_args(
    name: Option<String>,
    fqbn: Option<String>,
    port: Option<String>,
) -> SelectionConfig {
    let board = name.map(|name| Board {
        name,
        fqbn,
        port: None,
    });
    SelectionConfig::new(board, port)
}

pub async fn execute_select_command(
    config: &AppConfig,
    name: Option<String>,
    fqbn: Option<String>,
    port: Option<String>,
) -> Result<()> {
    let selection = selection_from_args(name, fqbn, port);
    let mut service = super::load_service(config).await;

    service.set_selection(selection.clone()).await;
    println!("🎯 Selected: {}", selection);

    if selection.can_upload() {
        println!("💾 Remembered for automatic reconnection");
    } else if selection.can_verify() {
        println!("⚠️  Selection can compile but not upload, so it was not remembered");
        if let Err(e) = selection.upload_target() {
            println!("   {}", e);
        }
    } else {
        println!("⚠️  No board given, nothing remembered");
    }

    Ok(())
}
