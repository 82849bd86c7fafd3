//! Application configuration management

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{BoardsError, Result};
use crate::services::catalog::CatalogEntry;
use crate::storage::file_store::default_state_path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Persistent state configuration
    pub storage: StorageConfig,
    /// Board discovery configuration
    pub discovery: DiscoveryConfig,
    /// Extra USB identities, checked before the built-in catalog
    pub catalog: Vec<CatalogEntry>,
}

/// Persistent state configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State file location, defaults to the user's config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

/// Board discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Polling interval in milliseconds
    pub scan_interval_ms: u64,
    /// Report non-USB serial ports as well
    pub include_non_usb: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: 1000,
            include_non_usb: false,
        }
    }
}

impl DiscoveryConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms.max(1))
    }
}

impl StorageConfig {
    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_path)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content)?;
                debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(BoardsError::Config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Default configuration file path: `<config dir>/boardsync/boardsync.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boardsync")
        .join("boardsync.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.discovery.scan_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
[discovery]
scan_interval_ms = 250

[[catalog]]
vid = 6790
pid = 29987
name = "Nano clone"
fqbn = "arduino:avr:nano"
"#,
        )
        .unwrap();

        assert_eq!(config.discovery.scan_interval_ms, 250);
        assert!(!config.discovery.include_non_usb);
        assert!(config.storage.state_file.is_none());
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog[0].vid, 0x1A86);
        assert_eq!(config.catalog[0].fqbn.as_deref(), Some("arduino:avr:nano"));
    }

    #[test]
    fn test_generated_config_parses_back() {
        let mut config = AppConfig::default();
        config.storage.state_file = Some(PathBuf::from("/tmp/state.ron"));
        let toml = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml("discovery = 5"),
            Err(BoardsError::Config(_))
        ));
    }
}
