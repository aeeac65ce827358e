//! CLI execution context.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use photowalls_commerce::config::StoreConfig;
use photowalls_commerce::session::Storefront;
use photowalls_commerce::shop::Shop;
use photowalls_commerce::SessionId;
use photowalls_observability::{LogFormat, LogLevel, SessionLogger};

use crate::config::{find_config_file, load_config};
use crate::output::Output;

/// Where the store config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::BuiltIn => "built-in sample store".to_string(),
        }
    }
}

/// Execution context for CLI commands.
pub struct Context {
    /// Store configuration.
    pub config: StoreConfig,
    /// Where `config` was read from.
    pub source: ConfigSource,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context: explicit path, then a file found upward from the
    /// working directory, then the built-in store.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, source) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (load_config(&path)?, ConfigSource::File(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (load_config(&path)?, ConfigSource::File(path)),
                None => (
                    StoreConfig::sample().context("Failed to build the built-in store")?,
                    ConfigSource::BuiltIn,
                ),
            },
        };

        output.debug(&format!("Using config: {}", source.describe()));

        Ok(Self {
            config,
            source,
            output,
            cwd,
        })
    }

    /// Validate the config and build the shop.
    pub fn shop(&self) -> Result<Arc<Shop>> {
        let shop = Shop::from_config(&self.config)
            .with_context(|| format!("Invalid store config ({})", self.source.describe()))?;
        Ok(Arc::new(shop))
    }

    /// Open a new storefront session with logging set up from the flags.
    pub fn storefront(&self) -> Result<Storefront> {
        let shop = self.shop()?;
        let session = SessionId::generate();
        let level = if self.output.is_verbose() {
            LogLevel::Debug
        } else {
            LogLevel::Error
        };
        let format = if self.output.is_json() {
            LogFormat::Json
        } else {
            LogFormat::Human
        };
        let logger = SessionLogger::new(session.as_str())
            .with_store("photowalls")
            .with_min_level(level)
            .with_format(format);
        Ok(Storefront::with_logger(shop, logger))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &std::path::Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
