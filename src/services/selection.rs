//! Board selection and reconciliation service
//!
//! Owns the current board/port selection and the last upload-capable
//! selection. The last valid selection is persisted so that a board that
//! drops off the bus (or re-enumerates on a new port after an upload) can
//! be picked up again automatically.
//!
//! None of the operations fail. Storage problems are logged and otherwise
//! ignored; a reconnect that finds nothing reports `false`.

use log::{debug, error, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::events::EventHub;
use super::reconnect::{ReconnectMatch, find_reconnect_target};
use crate::errors::Result;
use crate::models::{AttachedBoardsChange, Board, BoardInstalled, SelectionConfig, ValidSelection};
use crate::storage::KeyValueStore;

/// Store key holding the last valid selection
pub const LATEST_VALID_CONFIG_KEY: &str = "latest-valid-boards-config";

/// Selection state plus its persistence and notification plumbing.
///
/// Mutating operations take `&mut self`: the service is meant to be driven
/// from a single event loop, and every call returns only once its
/// persist-then-notify sequence has completed.
pub struct BoardSelectionService {
    selection: SelectionConfig,
    last_valid: Option<ValidSelection>,
    store: Arc<dyn KeyValueStore>,
    events: EventHub,
}

impl BoardSelectionService {
    /// Create the service and load the last valid selection from `store`
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_events(store, EventHub::new()).await
    }

    pub async fn load_with_events(store: Arc<dyn KeyValueStore>, events: EventHub) -> Self {
        let mut service = Self {
            selection: SelectionConfig::default(),
            last_valid: None,
            store,
            events,
        };
        service.load_state().await;
        service
    }

    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    pub fn last_valid(&self) -> Option<&ValidSelection> {
        self.last_valid.as_ref()
    }

    pub fn subscribe_selection(&self) -> broadcast::Receiver<SelectionConfig> {
        self.events.subscribe_selection()
    }

    pub fn subscribe_boards_changed(&self) -> broadcast::Receiver<AttachedBoardsChange> {
        self.events.subscribe_boards_changed()
    }

    pub fn subscribe_board_installed(&self) -> broadcast::Receiver<BoardInstalled> {
        self.events.subscribe_board_installed()
    }

    /// Replace the current selection.
    ///
    /// An upload-capable selection also becomes the last valid one and is
    /// written to the store. The selection-changed event is published after
    /// that write has settled, whether it succeeded or not.
    pub async fn set_selection(&mut self, config: SelectionConfig) {
        info!("Board config changed: {}", describe(&config));
        self.selection = config;

        if let Ok(valid) = ValidSelection::try_from(self.selection.clone()) {
            self.last_valid = Some(valid);
            if let Err(e) = self.save_state().await {
                error!("Failed to persist last valid board config: {}", e);
            }
        }

        self.events.publish_selection(self.selection.clone());
    }

    /// React to boards being plugged in or removed.
    ///
    /// Drops the selected port if it went away, forwards the event to
    /// subscribers, then tries to reconnect to one of the new boards.
    pub async fn notify_attached_boards_changed(&mut self, event: AttachedBoardsChange) {
        info!("Attached boards changed: {}", describe(&event));

        let detached_ports = event.detached_ports();
        let selected_port_detached = self
            .selection
            .port()
            .is_some_and(|port| detached_ports.contains(&port));

        if selected_port_detached {
            debug!(
                "Selected port {:?} was detached, clearing it",
                self.selection.selected_port
            );
            let config = self.selection.without_port();
            self.set_selection(config).await;
        }

        let attached = event.attached.clone();
        self.events.publish_boards_changed(event);
        self.try_reconnect(&attached).await;
    }

    /// Forward a finished platform installation to subscribers
    pub fn notify_board_installed(&self, event: BoardInstalled) {
        info!("Board installed: {}", describe(&event));
        self.events.publish_board_installed(event);
    }

    /// Try to restore the last valid selection from `boards`.
    ///
    /// Does nothing and returns `false` if there is no last valid selection
    /// or the current selection can already be uploaded to.
    pub async fn try_reconnect(&mut self, boards: &[Board]) -> bool {
        if self.selection.can_upload() {
            return false;
        }
        let Some(last_valid) = self.last_valid.as_ref() else {
            return false;
        };

        match find_reconnect_target(last_valid, boards) {
            Some((config, kind)) => {
                match kind {
                    ReconnectMatch::Exact => info!("Reconnected to {}", last_valid),
                    ReconnectMatch::PortChanged => info!(
                        "Reconnected to {} on new port {}",
                        last_valid.board().name,
                        config.port().unwrap_or_default()
                    ),
                }
                self.set_selection(config).await;
                true
            }
            None => {
                debug!("No attached board matches {}", last_valid);
                false
            }
        }
    }

    /// [`try_reconnect`](Self::try_reconnect) with a board list that is still being resolved
    pub async fn try_reconnect_pending<F>(&mut self, boards: F) -> bool
    where
        F: Future<Output = Vec<Board>>,
    {
        let boards = boards.await;
        self.try_reconnect(&boards).await
    }

    async fn save_state(&self) -> Result<()> {
        let Some(last_valid) = &self.last_valid else {
            return Ok(());
        };
        let json = serde_json::to_string(last_valid)?;
        self.store.set(LATEST_VALID_CONFIG_KEY, json).await
    }

    async fn load_state(&mut self) {
        let stored = match self.store.get(LATEST_VALID_CONFIG_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to load last valid board config: {}", e);
                return;
            }
        };
        let Some(json) = stored else {
            debug!("No last valid board config stored");
            return;
        };

        match serde_json::from_str::<ValidSelection>(&json) {
            Ok(valid) => {
                info!("Loaded last valid board config: {}", valid);
                self.last_valid = Some(valid);
            }
            Err(e) => warn!("Ignoring unreadable last valid board config: {}", e),
        }
    }
}

fn describe<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn uno() -> Board {
        Board::new("Arduino Uno").with_fqbn("arduino:avr:uno")
    }

    fn uno_on(port: &str) -> SelectionConfig {
        SelectionConfig::new(Some(uno()), Some(port.to_string()))
    }

    async fn service() -> (BoardSelectionService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = BoardSelectionService::load(store.clone()).await;
        (service, store)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (service, _) = service().await;
        assert!(service.selection().is_empty());
        assert!(service.last_valid().is_none());
    }

    #[tokio::test]
    async fn test_upload_capable_selection_becomes_last_valid() {
        let (mut service, store) = service().await;
        service.set_selection(uno_on("COM3")).await;

        assert_eq!(service.last_valid().unwrap().to_config(), uno_on("COM3"));
        let stored = store.peek(LATEST_VALID_CONFIG_KEY).unwrap();
        let restored: ValidSelection = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored.to_config(), uno_on("COM3"));
    }

    #[tokio::test]
    async fn test_incomplete_selection_keeps_last_valid() {
        let (mut service, store) = service().await;
        service.set_selection(uno_on("COM3")).await;
        let stored = store.peek(LATEST_VALID_CONFIG_KEY);

        service
            .set_selection(SelectionConfig::new(Some(uno()), None))
            .await;
        service.set_selection(SelectionConfig::default()).await;

        assert_eq!(service.last_valid().unwrap().to_config(), uno_on("COM3"));
        assert_eq!(store.peek(LATEST_VALID_CONFIG_KEY), stored);
        assert!(service.selection().is_empty());
    }

    #[tokio::test]
    async fn test_reconnect_without_last_valid_is_noop() {
        let (mut service, _) = service().await;
        let boards = vec![uno().with_port("COM3")];
        assert!(!service.try_reconnect(&boards).await);
        assert!(service.selection().is_empty());
    }

    #[tokio::test]
    async fn test_reconnect_pending_awaits_board_list() {
        let (mut service, _) = service().await;
        service.set_selection(uno_on("COM3")).await;
        service.set_selection(SelectionConfig::default()).await;

        let boards = async { vec![uno().with_port("COM7")] };
        assert!(service.try_reconnect_pending(boards).await);
        assert_eq!(service.selection(), &uno_on("COM7"));
    }

    #[tokio::test]
    async fn test_board_installed_is_forwarded() {
        let (service, _) = service().await;
        let mut rx = service.subscribe_board_installed();

        let event = BoardInstalled {
            package: crate::models::PlatformPackage {
                id: "arduino:avr".to_string(),
                name: "Arduino AVR Boards".to_string(),
                version: "1.8.6".to_string(),
                boards: vec![uno()],
            },
        };
        service.notify_board_installed(event.clone());
        assert_eq!(rx.recv().await.unwrap(), event);
    }
}
