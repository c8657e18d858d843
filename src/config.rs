//! Configuration loading for dealboard
//!
//! Settings are layered: built-in defaults, then `dealboard.toml`, then
//! `DEALBOARD_*` environment variables, then command-line flags (applied by
//! the caller). The config file is looked up at `--config`, then in the
//! current directory, then in the user config directory.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::constants::{CONFIG_FILE_NAME, DEFAULT_DATA_DIR};

pub const ENV_DATA_DIR: &str = "DEALBOARD_DATA_DIR";
pub const ENV_BACKEND: &str = "DEALBOARD_BACKEND";
pub const ENV_REMOTE_URL: &str = "DEALBOARD_REMOTE_URL";
pub const ENV_PROJECT_ID: &str = "DEALBOARD_PROJECT_ID";
pub const ENV_PUBLIC_KEY: &str = "DEALBOARD_PUBLIC_KEY";

/// Which store adapter backs the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Remote,
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "remote" => Ok(Backend::Remote),
            _ => bail!("Invalid backend: {s}. Use: file, remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Connection settings for the hosted record-query service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
    /// Records requested per page when fetching a whole table.
    pub page_size: u32,
    /// Upper bound on pages requested for one table before giving up.
    pub max_pages: u32,
    pub deals_table: String,
    pub contacts_table: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            project_id: String::new(),
            public_key: String::new(),
            page_size: 100,
            max_pages: 1000,
            deals_table: "deal_c".to_string(),
            contacts_table: "contact_c".to_string(),
        }
    }
}

impl RemoteConfig {
    /// Check that the settings needed to reach the service are present.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("Remote backend requires remote.base_url (or {ENV_REMOTE_URL})");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            bail!("remote.base_url must start with http:// or https://");
        }
        if self.project_id.trim().is_empty() {
            bail!("Remote backend requires remote.project_id (or {ENV_PROJECT_ID})");
        }
        if self.public_key.trim().is_empty() {
            bail!("Remote backend requires remote.public_key (or {ENV_PUBLIC_KEY})");
        }
        if self.page_size == 0 {
            bail!("remote.page_size must be at least 1");
        }
        if self.max_pages == 0 {
            bail!("remote.max_pages must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub remote: RemoteConfig,
}

impl Config {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve the config: explicit path (must exist), else the first
    /// existing default location, else built-in defaults. Environment
    /// overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_locations().into_iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// `./dealboard.toml`, then `<user config dir>/dealboard/config.toml`.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("dealboard").join("config.toml"));
        }
        locations
    }

    /// Override settings from `DEALBOARD_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(dir) = non_empty_env(ENV_DATA_DIR) {
            self.store.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = non_empty_env(ENV_BACKEND) {
            self.store.backend = backend
                .parse()
                .with_context(|| format!("Invalid {ENV_BACKEND}"))?;
        }
        if let Some(url) = non_empty_env(ENV_REMOTE_URL) {
            self.remote.base_url = url;
        }
        if let Some(project_id) = non_empty_env(ENV_PROJECT_ID) {
            self.remote.project_id = project_id;
        }
        if let Some(key) = non_empty_env(ENV_PUBLIC_KEY) {
            self.remote.public_key = key;
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
