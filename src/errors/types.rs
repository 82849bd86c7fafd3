//! Custom error types for boardsync

use std::fmt;

/// Main error type for boardsync operations
#[derive(Debug)]
pub enum BoardsError {
    /// Configuration related errors
    Config(String),
    /// Persistent store errors
    Storage(String),
    /// Board discovery errors
    Discovery(String),
    /// General I/O errors
    Io(std::io::Error),
    /// Serialization errors
    Serialization(String),
    /// Compile or upload requested without a board
    NoBoardSelected,
    /// Selected board has no installed platform core
    NoCoreInstalled(String),
    /// Upload requested without a port
    NoPortSelected,
}

impl fmt::Display for BoardsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardsError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BoardsError::Storage(msg) => write!(f, "Storage error: {}", msg),
            BoardsError::Discovery(msg) => write!(f, "Discovery error: {}", msg),
            BoardsError::Io(err) => write!(f, "I/O error: {}", err),
            BoardsError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            BoardsError::NoBoardSelected => {
                write!(f, "No boards selected. Please select a board.")
            }
            BoardsError::NoCoreInstalled(name) => write!(
                f,
                "No core is installed for {}. Please install the board.",
                name
            ),
            BoardsError::NoPortSelected => write!(f, "No ports selected. Please select a port."),
        }
    }
}

impl std::error::Error for BoardsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BoardsError {
    fn from(err: std::io::Error) -> Self {
        BoardsError::Io(err)
    }
}

impl From<serde_json::Error> for BoardsError {
    fn from(err: serde_json::Error) -> Self {
        BoardsError::Serialization(err.to_string())
    }
}

impl From<ron::Error> for BoardsError {
    fn from(err: ron::Error) -> Self {
        BoardsError::Serialization(err.to_string())
    }
}

impl From<ron::error::SpannedError> for BoardsError {
    fn from(err: ron::error::SpannedError) -> Self {
        BoardsError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BoardsError {
    fn from(err: toml::de::Error) -> Self {
        BoardsError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BoardsError {
    fn from(err: toml::ser::Error) -> Self {
        BoardsError::Config(err.to_string())
    }
}

impl From<serialport::Error> for BoardsError {
    fn from(err: serialport::Error) -> Self {
        BoardsError::Discovery(err.to_string())
    }
}

/// Result type alias for boardsync operations
pub type Result<T> = std::result::Result<T, BoardsError>;
