//! Error types for boardsync

pub mod types;

pub use types::*;
