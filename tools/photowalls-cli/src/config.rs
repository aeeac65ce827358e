//! Store config discovery and generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use photowalls_commerce::config::StoreConfig;

/// File names searched for, in priority order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["photowalls.toml", ".photowalls.toml", "photowalls.json"];

/// File written by `config init`.
pub const DEFAULT_CONFIG_FILE: &str = "photowalls.toml";

/// Walk from `start` up to the filesystem root looking for a config file.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file with path context on failure.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    StoreConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Render the built-in store as a commented TOML document.
pub fn generate_default_config() -> Result<String> {
    let body = StoreConfig::sample()
        .and_then(|config| config.to_toml_string())
        .context("Failed to render the built-in store")?;

    Ok(format!(
        "# PhotoWalls store configuration\n\
         #\n\
         # Prices are whole units of `currency`. Discounts and promo percentages\n\
         # must be between 1 and 100. Set `uploads.max_bytes` to enforce a limit.\n\n\
         {body}"
    ))
}
