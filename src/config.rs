//! # Configuration
//!
//! Settings read from an optional TOML file. Every field has a default, so an
//! empty file (or no file at all) gives a working setup.
//!
//! ```toml
//! name = "SKE Restaurant"
//! menu_path = "data/menu.txt"
//!
//! [ledger]
//! path = "data/orders.log"
//! fallback_dir = "/var/tmp"
//! console = false
//! channel_capacity = 32
//! ```

use crate::ledger::SinkCascade;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    /// Shown in the console banner.
    pub name: String,
    pub menu_path: PathBuf,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub path: PathBuf,
    /// Where the fallback file goes when `path` cannot be opened. Defaults to the system temp dir.
    pub fallback_dir: Option<PathBuf>,
    /// Skip the files and write records to the console.
    pub console: bool,
    pub channel_capacity: usize,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: "SKE Restaurant".to_string(),
            menu_path: PathBuf::from("data/menu.txt"),
            ledger: LedgerConfig::default(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/orders.log"),
            fallback_dir: None,
            console: false,
            channel_capacity: 32,
        }
    }
}

impl RestaurantConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!(?config, "Config loaded");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl LedgerConfig {
    /// Builds the sink cascade this configuration describes.
    pub fn sink(&self) -> SinkCascade {
        if self.console {
            return SinkCascade::console();
        }
        let fallback = self.fallback_dir.clone().unwrap_or_else(std::env::temp_dir);
        SinkCascade::file(self.path.clone(), fallback)
    }
}
