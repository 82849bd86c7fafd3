//! Watch command implementation - live attach/detach handling

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

use crate::config::AppConfig;
use crate::services::{BoardDiscovery, DiscoveryWatcher};

/// Polling interval, with the command-line override clamped like the config value
fn watch_interval(config: &AppConfig, interval_ms: Option<u64>) -> Duration {
    interval_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.discovery.scan_interval())
}

pub async fn execute_watch_command(config: &AppConfig, interval_ms: Option<u64>) -> Result<()> {
    let mut service = super::load_service(config).await;
    let discovery: Arc<dyn BoardDiscovery> = Arc::new(super::serial_discovery(config));
    let interval = watch_interval(config, interval_ms);

    match service.last_valid() {
        Some(last_valid) => println!("💾 Remembered: {}", last_valid),
        None => println!("📋 No board remembered yet, reconnection is disabled"),
    }

    let printer = spawn_event_printer(&service);

    let startup_boards = {
        let discovery = discovery.clone();
        async move {
            discovery.attached_boards().await.unwrap_or_else(|e| {
                warn!("Initial board discovery failed: {}", e);
                Vec::new()
            })
        }
    };
    if service.try_reconnect_pending(startup_boards).await {
        info!("Selection restored at startup");
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = DiscoveryWatcher::new(discovery, interval);
    let cancel = watcher.cancel_signal();
    let watcher_task = watcher.spawn(tx);

    println!("👀 Watching for boards (Ctrl+C to stop)...");
    loop {
        tokio::select! {
            change = rx.recv() => match change {
                Some(change) => service.notify_attached_boards_changed(change).await,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!("\n🛑 Stopping");
                break;
            }
        }
    }

    cancel.store(true, Ordering::Relaxed);
    drop(rx);
    if let Err(e) = watcher_task.await {
        warn!("Discovery task ended abnormally: {}", e);
    }
    printer.abort();

    println!("🎯 Final selection: {}", service.selection());
    Ok(())
}

fn spawn_event_printer(
    service: &crate::services::BoardSelectionService,
) -> tokio::task::JoinHandle<()> {
    let mut selection_rx = service.subscribe_selection();
    let mut boards_rx = service.subscribe_boards_changed();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                selection = selection_rx.recv() => match selection {
                    Ok(selection) => println!("🎯 Selection: {}", selection),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Missed {} selection events", n)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                change = boards_rx.recv() => match change {
                    Ok(change) => {
                        for board in &change.attached {
                            println!("🔌 Attached: {}", board);
                        }
                        for board in &change.detached {
                            println!("⏏️  Detached: {}", board);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Missed {} board events", n)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    })
}
