//! Board discovery over USB serial ports
//!
//! [`SerialPortDiscovery`] turns the host's serial ports into [`Board`]s,
//! and [`DiscoveryWatcher`] polls any [`BoardDiscovery`] source and emits
//! attach/detach deltas.

use async_trait::async_trait;
use log::{debug, info, trace, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::catalog::BoardCatalog;
use crate::errors::{BoardsError, Result};
use crate::models::{AttachedBoardsChange, Board};

/// Source of the currently attached boards
#[async_trait]
pub trait BoardDiscovery: Send + Sync {
    async fn attached_boards(&self) -> Result<Vec<Board>>;
}

/// Discovery backed by the operating system's serial port enumeration
#[derive(Debug, Clone)]
pub struct SerialPortDiscovery {
    catalog: BoardCatalog,
    include_non_usb: bool,
}

impl SerialPortDiscovery {
    pub fn new(catalog: BoardCatalog) -> Self {
        Self {
            catalog,
            include_non_usb: false,
        }
    }

    /// Also report PCI, Bluetooth and unknown serial ports
    pub fn include_non_usb(mut self, include: bool) -> Self {
        self.include_non_usb = include;
        self
    }

    /// Board for a USB serial port with the given identifiers
    pub fn identify_usb(&self, port_name: &str, vid: u16, pid: u16, product: Option<&str>) -> Board {
        let board = match self.catalog.lookup(vid, pid) {
            Some(entry) => {
                let board = Board::new(entry.name.clone());
                match &entry.fqbn {
                    Some(fqbn) => board.with_fqbn(fqbn.clone()),
                    None => board,
                }
            }
            None => Board::new(product.unwrap_or("Unknown")),
        };
        trace!(
            "USB device VID:0x{:04x} PID:0x{:04x} on {} identified as {}",
            vid, pid, port_name, board.name
        );
        board.with_port(port_name)
    }

    fn board_from_port(&self, port_info: &serialport::SerialPortInfo) -> Option<Board> {
        use serialport::SerialPortType;

        match &port_info.port_type {
            SerialPortType::UsbPort(usb) => Some(self.identify_usb(
                &port_info.port_name,
                usb.vid,
                usb.pid,
                usb.product.as_deref(),
            )),
            SerialPortType::PciPort if self.include_non_usb => {
                Some(Board::new("PCI Serial Port").with_port(&port_info.port_name))
            }
            SerialPortType::BluetoothPort if self.include_non_usb => {
                Some(Board::new("Bluetooth Serial Port").with_port(&port_info.port_name))
            }
            SerialPortType::Unknown if self.include_non_usb => {
                Some(Board::new("Unknown Serial Port").with_port(&port_info.port_name))
            }
            _ => None,
        }
    }
}

impl Default for SerialPortDiscovery {
    fn default() -> Self {
        Self::new(BoardCatalog::builtin())
    }
}

#[async_trait]
impl BoardDiscovery for SerialPortDiscovery {
    async fn attached_boards(&self) -> Result<Vec<Board>> {
        let ports = tokio::task::spawn_blocking(serialport::available_ports)
            .await
            .map_err(|e| BoardsError::Discovery(format!("port enumeration task failed: {}", e)))??;

        let mut boards: Vec<Board> = ports
            .iter()
            .filter_map(|port_info| self.board_from_port(port_info))
            .collect();
        // Stable order so that identical boards are always matched the same way
        boards.sort_by(|a, b| a.port.cmp(&b.port));

        debug!("Found {} attached board(s)", boards.len());
        Ok(boards)
    }
}

/// Default polling interval for [`DiscoveryWatcher`]
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(1000);

/// Polls a discovery source and sends a delta whenever the set changes
pub struct DiscoveryWatcher {
    discovery: Arc<dyn BoardDiscovery>,
    interval: Duration,
    cancel_signal: Arc<AtomicBool>,
}

impl DiscoveryWatcher {
    pub fn new(discovery: Arc<dyn BoardDiscovery>, interval: Duration) -> Self {
        Self {
            discovery,
            interval,
            cancel_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the watcher once set
    pub fn cancel_signal(&self) -> Arc<AtomicBool> {
        self.cancel_signal.clone()
    }

    /// Run the polling loop on a background task.
    ///
    /// The first delta reports everything already attached. The task ends
    /// when cancelled or when `tx`'s receiver is dropped.
    pub fn spawn(self, tx: mpsc::UnboundedSender<AttachedBoardsChange>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(tx).await })
    }

    async fn run(self, tx: mpsc::UnboundedSender<AttachedBoardsChange>) {
        info!("Board discovery started (interval {:?})", self.interval);
        let mut previous: Vec<Board> = Vec::new();

        loop {
            if self.cancel_signal.load(Ordering::Relaxed) {
                info!("Board discovery cancelled");
                break;
            }

            match self.discovery.attached_boards().await {
                Ok(current) => {
                    let change = AttachedBoardsChange::diff(&previous, &current);
                    if !change.is_empty() {
                        debug!(
                            "{} board(s) attached, {} detached",
                            change.attached.len(),
                            change.detached.len()
                        );
                        if tx.send(change).is_err() {
                            debug!("Discovery receiver dropped, stopping");
                            break;
                        }
                    }
                    previous = current;
                }
                Err(e) => warn!("Board discovery poll failed: {}", e),
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_identify_known_board() {
        let discovery = SerialPortDiscovery::default();
        let board = discovery.identify_usb("/dev/ttyACM0", 0x2341, 0x0043, Some("Uno"));
        assert_eq!(
            board,
            Board::new("Arduino Uno")
                .with_fqbn("arduino:avr:uno")
                .with_port("/dev/ttyACM0")
        );
    }

    #[test]
    fn test_identify_unknown_board_uses_product_name() {
        let discovery = SerialPortDiscovery::default();
        let board = discovery.identify_usb("COM7", 0xDEAD, 0xBEEF, Some("Widget"));
        assert_eq!(board.name, "Widget");
        assert!(board.fqbn.is_none());
        assert_eq!(board.port.as_deref(), Some("COM7"));

        let board = discovery.identify_usb("COM8", 0xDEAD, 0xBEEF, None);
        assert_eq!(board.name, "Unknown");
    }

    struct ScriptedDiscovery {
        snapshots: Mutex<Vec<Vec<Board>>>,
    }

    #[async_trait]
    impl BoardDiscovery for ScriptedDiscovery {
        async fn attached_boards(&self) -> Result<Vec<Board>> {
            let mut snapshots = self.snapshots.lock().unwrap();
            if snapshots.len() > 1 {
                Ok(snapshots.remove(0))
            } else {
                Ok(snapshots[0].clone())
            }
        }
    }

    #[tokio::test]
    async fn test_watcher_emits_attach_then_detach() {
        let uno = Board::new("Arduino Uno")
            .with_fqbn("arduino:avr:uno")
            .with_port("COM3");
        let discovery = Arc::new(ScriptedDiscovery {
            snapshots: Mutex::new(vec![vec![], vec![uno.clone()], vec![uno.clone()], vec![]]),
        });

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watcher = DiscoveryWatcher::new(discovery, Duration::from_millis(5));
        let cancel = watcher.cancel_signal();
        let handle = watcher.spawn(tx);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.attached, vec![uno.clone()]);
        assert!(first.detached.is_empty());

        let second = rx.recv().await.unwrap();
        assert!(second.attached.is_empty());
        assert_eq!(second.detached, vec![uno]);

        cancel.store(true, Ordering::Relaxed);
        handle.await.unwrap();
    }
}
