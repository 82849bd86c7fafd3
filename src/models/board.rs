//! Board and selection data models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::BoardsError;

/// A target device: an attached board or an entry picked from the board list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Human-readable board name
    pub name: String,
    /// Fully-qualified board name (absent when no platform core is installed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqbn: Option<String>,
    /// Serial port the board is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fqbn: None,
            port: None,
        }
    }

    pub fn with_fqbn(mut self, fqbn: impl Into<String>) -> Self {
        self.fqbn = Some(fqbn.into());
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Port of a serial-attached board, `None` for anything else
    pub fn serial_port(&self) -> Option<&str> {
        self.port.as_deref().filter(|port| !port.is_empty())
    }

    pub fn is_serial(&self) -> bool {
        self.serial_port().is_some()
    }

    /// FQBN if one is installed, ignoring empty strings
    pub fn installed_fqbn(&self) -> Option<&str> {
        self.fqbn.as_deref().filter(|fqbn| !fqbn.is_empty())
    }

    /// Name and FQBN match, port ignored
    pub fn same_identity(&self, other: &Board) -> bool {
        self.name == other.name && self.fqbn == other.fqbn
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(fqbn) = &self.fqbn {
            write!(f, " [{}]", fqbn)?;
        }
        if let Some(port) = &self.port {
            write!(f, " @ {}", port)?;
        }
        Ok(())
    }
}

/// The user's current board and port choice.
///
/// Every shape is accepted, including the empty one. Whether the selection
/// can be compiled against or uploaded to is answered by [`can_verify`] and
/// [`can_upload`].
///
/// [`can_verify`]: SelectionConfig::can_verify
/// [`can_upload`]: SelectionConfig::can_upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_board: Option<Board>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_port: Option<String>,
}

impl SelectionConfig {
    pub fn new(board: Option<Board>, port: Option<String>) -> Self {
        Self {
            selected_board: board,
            selected_port: port,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_board.is_none() && self.selected_port.is_none()
    }

    /// Compile-capable: a board is selected
    pub fn can_verify(&self) -> bool {
        self.selected_board.is_some()
    }

    /// Upload-capable: a board with an installed FQBN and a port are selected
    pub fn can_upload(&self) -> bool {
        self.port().is_some()
            && self
                .selected_board
                .as_ref()
                .is_some_and(|board| board.installed_fqbn().is_some())
    }

    pub fn port(&self) -> Option<&str> {
        self.selected_port.as_deref().filter(|port| !port.is_empty())
    }

    /// Same board, port cleared
    pub fn without_port(&self) -> Self {
        Self {
            selected_board: self.selected_board.clone(),
            selected_port: None,
        }
    }

    /// Board to compile against, or the reason compiling is not possible
    pub fn compile_target(&self) -> Result<&Board, BoardsError> {
        let board = self
            .selected_board
            .as_ref()
            .ok_or(BoardsError::NoBoardSelected)?;
        if board.installed_fqbn().is_none() {
            return Err(BoardsError::NoCoreInstalled(board.name.clone()));
        }
        Ok(board)
    }

    /// Board and port to upload to, or the reason uploading is not possible
    pub fn upload_target(&self) -> Result<(&Board, &str), BoardsError> {
        let board = self
            .selected_board
            .as_ref()
            .ok_or(BoardsError::NoBoardSelected)?;
        let port = self.port().ok_or(BoardsError::NoPortSelected)?;
        if board.installed_fqbn().is_none() {
            return Err(BoardsError::NoCoreInstalled(board.name.clone()));
        }
        Ok((board, port))
    }
}

impl fmt::Display for SelectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.selected_board, self.port()) {
            (Some(board), Some(port)) => write!(f, "{} on {}", board.name, port),
            (Some(board), None) => write!(f, "{}", board.name),
            (None, Some(port)) => write!(f, "No board selected on {}", port),
            (None, None) => write!(f, "No board selected"),
        }
    }
}

/// An upload-capable selection, kept as the last known good configuration.
///
/// Can only be built from a [`SelectionConfig`] that passes
/// [`SelectionConfig::can_upload`]; deserialization enforces the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionConfig", into = "SelectionConfig")]
pub struct ValidSelection {
    board: Board,
    port: String,
}

impl ValidSelection {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn fqbn(&self) -> &str {
        self.board.installed_fqbn().unwrap_or_default()
    }

    /// The selection as stored, with the port it was saved with
    pub fn to_config(&self) -> SelectionConfig {
        SelectionConfig::new(Some(self.board.clone()), Some(self.port.clone()))
    }

    /// The stored selection moved to another port
    pub fn with_port(&self, port: impl Into<String>) -> SelectionConfig {
        SelectionConfig::new(Some(self.board.clone()), Some(port.into()))
    }
}

impl TryFrom<SelectionConfig> for ValidSelection {
    type Error = BoardsError;

    fn try_from(config: SelectionConfig) -> Result<Self, Self::Error> {
        if !config.can_upload() {
            return Err(BoardsError::Serialization(format!(
                "selection '{}' is not upload-capable",
                config
            )));
        }
        match config {
            SelectionConfig {
                selected_board: Some(board),
                selected_port: Some(port),
            } => Ok(Self { board, port }),
            _ => unreachable!("can_upload guarantees board and port"),
        }
    }
}

impl From<ValidSelection> for SelectionConfig {
    fn from(valid: ValidSelection) -> Self {
        SelectionConfig::new(Some(valid.board), Some(valid.port))
    }
}

impl fmt::Display for ValidSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] on {}", self.board.name, self.fqbn(), self.port)
    }
}
