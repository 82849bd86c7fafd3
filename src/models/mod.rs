//! Data models shared by the selection service, discovery and the CLI

pub mod board;
pub mod events;

// Re-export commonly used types
pub use board::*;
pub use events::*;
