//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base URL, request timeout, session storage
//! backend, and last used username.
//!
//! Configuration is stored at `~/.config/secureclaim/config.json`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::api::AuthClient;
use crate::auth::{FileStore, KeyringStore, MemoryStore, SessionManager, SessionStore};

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "secureclaim";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Where the persisted session lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// JSON file in the data directory
    #[default]
    File,
    /// OS keychain
    Keyring,
    /// Nothing persisted; every launch starts signed out
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub session_backend: SessionBackend,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the session file and logs
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Open the configured session store
    pub fn session_store(&self) -> Result<Arc<dyn SessionStore>> {
        let store: Arc<dyn SessionStore> = match self.session_backend {
            SessionBackend::File => Arc::new(FileStore::new(Self::data_dir()?)),
            SessionBackend::Keyring => Arc::new(KeyringStore::new()),
            SessionBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }

    /// Build a session manager wired to this configuration. The manager
    /// starts in `Loading`; call `initialize` on it.
    pub fn session_manager(&self) -> Result<SessionManager> {
        let client = AuthClient::new(self.api_base_url(), self.request_timeout())
            .context("Failed to build HTTP client")?;
        Ok(SessionManager::new(client, self.session_store()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.session_backend, SessionBackend::File);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("config.json")).expect("load");
        assert!(config.api_base_url.is_none());
        assert!(config.last_username.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_base_url: Some("https://claims.example.com".to_string()),
            request_timeout_secs: Some(5),
            session_backend: SessionBackend::Keyring,
            last_username: Some("alice".to_string()),
        };

        config.save_to(&path).expect("save");
        let loaded = Config::load_from(&path).expect("load");

        assert_eq!(loaded.api_base_url(), "https://claims.example.com");
        assert_eq!(loaded.request_timeout(), Duration::from_secs(5));
        assert_eq!(loaded.session_backend, SessionBackend::Keyring);
        assert_eq!(loaded.last_username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"session_backend": "memory"}"#).expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.session_backend, SessionBackend::Memory);
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_data_dir_needs_no_config() {
        if let Ok(dir) = Config::data_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(Config::load_from(&path).is_err());
    }
}
