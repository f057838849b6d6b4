// File: src/config.rs
// Purpose: Configuration parsing from stockroom.toml

use crate::store::StorageKeys;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Where and under which keys the snapshots live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_catalog_key")]
    pub catalog_key: String,

    #[serde(default = "default_ledger_key")]
    pub ledger_key: String,
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            catalog: self.catalog_key.clone(),
            ledger: self.ledger_key.clone(),
        }
    }
}

// Default values
fn default_name() -> String {
    "stockroom".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_catalog_key() -> String {
    StorageKeys::default().catalog
}

fn default_ledger_key() -> String {
    StorageKeys::default().ledger
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_key: default_catalog_key(),
            ledger_key: default_ledger_key(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./stockroom.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("stockroom.toml")
    }

    /// Apply `STOCKROOM_PORT` / `STOCKROOM_HOST` / `STOCKROOM_DATA_DIR` overrides
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("STOCKROOM_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("STOCKROOM_PORT is not a port number: {}", port))?;
        }
        if let Some(host) = lookup("STOCKROOM_HOST") {
            self.server.host = host;
        }
        if let Some(dir) = lookup("STOCKROOM_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.storage.keys(), StorageKeys::default());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.catalog_key, "wms_data");
        assert_eq!(config.storage.ledger_key, "wms_transactions");
    }

    #[test]
    fn test_custom_storage() {
        let toml = r#"
            [storage]
            data_dir = "/var/lib/stockroom"
            catalog_key = "catalog"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/stockroom"));
        assert_eq!(config.storage.catalog_key, "catalog");
        assert_eq!(config.storage.ledger_key, "wms_transactions");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.project.name, "stockroom");
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        fs::write(&path, "[server]\nport = \"lots\"").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            [("STOCKROOM_PORT", "8080"), ("STOCKROOM_DATA_DIR", "/tmp/inv")].into();
        let config = Config::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/inv"));

        let bad = Config::default().with_overrides(|k| (k == "STOCKROOM_PORT").then(|| "x".to_string()));
        assert!(bad.is_err());
    }
}
