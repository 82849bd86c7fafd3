//! boardsync - Board selection and auto-reconnect for serial development boards
//!
//! Keeps track of the selected board and port, remembers the last selection
//! that could be uploaded to, and restores it when the board shows up again,
//! even if it re-enumerated on a different serial port.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use errors::*;
pub use models::*;
pub use services::{BoardSelectionService, LATEST_VALID_CONFIG_KEY};

/// boardsync version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// boardsync application name
pub const APP_NAME: &str = "boardsync";
