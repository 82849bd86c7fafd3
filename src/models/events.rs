//! Board attach/detach and installation events

use serde::{Deserialize, Serialize};

use crate::models::board::Board;

/// Delta between two snapshots of the attached boards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedBoardsChange {
    /// Boards that appeared since the previous snapshot
    pub attached: Vec<Board>,
    /// Boards that disappeared since the previous snapshot
    pub detached: Vec<Board>,
}

impl AttachedBoardsChange {
    pub fn new(attached: Vec<Board>, detached: Vec<Board>) -> Self {
        Self { attached, detached }
    }

    /// Compute the change from `old` to `new`.
    ///
    /// Both sides keep the order of the snapshot they were taken from.
    pub fn diff(old: &[Board], new: &[Board]) -> Self {
        let attached = new
            .iter()
            .filter(|board| !old.contains(board))
            .cloned()
            .collect();
        let detached = old
            .iter()
            .filter(|board| !new.contains(board))
            .cloned()
            .collect();
        Self { attached, detached }
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }

    /// Ports of the detached serial boards
    pub fn detached_ports(&self) -> Vec<&str> {
        self.detached
            .iter()
            .filter_map(Board::serial_port)
            .collect()
    }
}

/// A platform package that provides board definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPackage {
    /// Package identifier, e.g. `arduino:avr`
    pub id: String,
    pub name: String,
    pub version: String,
    /// Boards the package makes available
    #[serde(default)]
    pub boards: Vec<Board>,
}

/// Fired when a platform package finishes installing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInstalled {
    pub package: PlatformPackage,
}
