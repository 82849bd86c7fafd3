//! Publish/subscribe channels for selection and board events

use log::trace;
use tokio::sync::broadcast;

use crate::models::{AttachedBoardsChange, BoardInstalled, SelectionConfig};

/// Default per-stream buffer before slow receivers start lagging
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// One broadcast channel per event stream.
///
/// Publishing never blocks and never fails: with no subscribers the event is
/// simply dropped. Receivers see events in publish order.
#[derive(Debug, Clone)]
pub struct EventHub {
    boards_changed: broadcast::Sender<AttachedBoardsChange>,
    board_installed: broadcast::Sender<BoardInstalled>,
    selection_changed: broadcast::Sender<SelectionConfig>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (boards_changed, _) = broadcast::channel(capacity);
        let (board_installed, _) = broadcast::channel(capacity);
        let (selection_changed, _) = broadcast::channel(capacity);
        Self {
            boards_changed,
            board_installed,
            selection_changed,
        }
    }

    pub fn subscribe_boards_changed(&self) -> broadcast::Receiver<AttachedBoardsChange> {
        self.boards_changed.subscribe()
    }

    pub fn subscribe_board_installed(&self) -> broadcast::Receiver<BoardInstalled> {
        self.board_installed.subscribe()
    }

    pub fn subscribe_selection(&self) -> broadcast::Receiver<SelectionConfig> {
        self.selection_changed.subscribe()
    }

    pub fn publish_boards_changed(&self, event: AttachedBoardsChange) {
        if self.boards_changed.send(event).is_err() {
            trace!("No subscribers for boards-changed event");
        }
    }

    pub fn publish_board_installed(&self, event: BoardInstalled) {
        if self.board_installed.send(event).is_err() {
            trace!("No subscribers for board-installed event");
        }
    }

    pub fn publish_selection(&self, config: SelectionConfig) {
        if self.selection_changed.send(config).is_err() {
            trace!("No subscribers for selection-changed event");
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
