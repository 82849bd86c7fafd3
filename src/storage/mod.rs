//! Persistent key-value storage
//!
//! The selection service only ever touches one slot of the store, but the
//! store itself is a plain string-keyed map so that it can be shared with
//! other state later on.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use async_trait::async_trait;

use crate::errors::Result;

/// Capability interface for a persistent string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the key was never set
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
