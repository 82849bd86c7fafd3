//! In-memory key-value store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::KeyValueStore;
use crate::errors::{BoardsError, Result};

/// Volatile store, used for tests and for sessions that should not persist.
///
/// Reads and writes can be switched to fail to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    /// Synchronous insert that bypasses failure injection
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Synchronous read that bypasses failure injection
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BoardsError::Storage(format!("read of '{}' failed", key)));
        }
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BoardsError::Storage(format!("write of '{}' failed", key)));
        }
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::with_entry("key", "value");
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));

        store.set_fail_reads(true);
        assert!(store.get("key").await.is_err());

        store.set_fail_writes(true);
        assert!(store.set("key", "other".to_string()).await.is_err());
        assert_eq!(store.peek("key").as_deref(), Some("value"));
    }
}
