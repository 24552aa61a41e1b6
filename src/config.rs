//! # System Configuration
//!
//! Read from TOML. Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! channel_buffer_size = 32
//! best_sellers_limit = 5
//!
//! [storage]
//! backend = "file"     # or "memory"
//! data_dir = "./data"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where cart line items are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    /// One JSON file per cart under `data_dir`.
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of every actor's request channel.
    pub channel_buffer_size: usize,
    /// Number of dishes in the best-seller ranking.
    pub best_sellers_limit: usize,
    pub storage: StorageConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: 32,
            best_sellers_limit: 5,
            storage: StorageConfig::default(),
        }
    }
}

impl SystemConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
