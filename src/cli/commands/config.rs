//! Config command implementation - write the default configuration

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::config::AppConfig;

pub async fn execute_config_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file '{}' already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let toml_content = AppConfig::default()
        .to_toml()
        .context("Failed to serialize default configuration")?;

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    fs::write(config_path, toml_content)
        .await
        .with_context(|| format!("Failed to write config file '{}'", config_path.display()))?;

    println!(
        "✅ Generated default configuration file: {}",
        config_path.display()
    );
    println!("ℹ️  Add [[catalog]] entries to recognise additional USB boards.");
    Ok(())
}
