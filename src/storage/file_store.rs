//! RON-file backed key-value store

use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::errors::{BoardsError, Result};

/// File name used inside the configuration directory
pub const STATE_FILE_NAME: &str = "boardsync-state.ron";

/// On-disk layout of the state file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFile {
    /// Format version for compatibility
    config_version: u32,
    last_updated: DateTime<Local>,
    entries: HashMap<String, String>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            config_version: 1,
            last_updated: Local::now(),
            entries: HashMap::new(),
        }
    }
}

/// Key-value store persisted as a pretty-printed RON file.
///
/// The file is read on first access and rewritten on every `set`. A missing
/// file is treated as an empty store.
pub struct FileStore {
    path: PathBuf,
    cache: Mutex<Option<StateFile>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(path: &Path) -> Result<StateFile> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let state: StateFile = ron::from_str(&content)?;
                debug!(
                    "Loaded {} entries from {}",
                    state.entries.len(),
                    path.display()
                );
                Ok(state)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", path.display());
                Ok(StateFile::default())
            }
            Err(e) => Err(BoardsError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_file(path: &Path, state: &StateFile) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let ron_string = ron::ser::to_string_pretty(state, ron::ser::PrettyConfig::default())?;
        tokio::fs::write(path, ron_string).await.map_err(|e| {
            BoardsError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;
        info!("Saved state to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(Self::read_file(&self.path).await?);
        }
        Ok(cache
            .as_ref()
            .and_then(|state| state.entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut cache = self.cache.lock().await;
        let mut state = match cache.take() {
            Some(state) => state,
            None => match Self::read_file(&self.path).await {
                Ok(state) => state,
                Err(BoardsError::Serialization(e)) => {
                    warn!(
                        "Unreadable state file {}, replacing it: {}",
                        self.path.display(),
                        e
                    );
                    StateFile::default()
                }
                Err(e) => return Err(e),
            },
        };
        state.entries.insert(key.to_string(), value);
        state.last_updated = Local::now();

        let result = Self::write_file(&self.path, &state).await;
        *cache = Some(state);
        result
    }
}

/// Default state file path: `<config dir>/boardsync/boardsync-state.ron`
pub fn default_state_path() -> PathBuf {
    let config_dir = if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("boardsync")
    } else {
        // Fallback to home directory
        PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
            .join(".config")
            .join("boardsync")
    };
    config_dir.join(STATE_FILE_NAME)
}
