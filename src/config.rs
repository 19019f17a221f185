//! Configuration loaded from a TOML file plus environment overrides.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key; `OPENAI_API_KEY` wins when set.
    pub api_key: Option<String>,
    /// Root of the OpenAI-compatible API; `OPENAI_BASE_URL` wins when set.
    pub base_url: String,
    /// Store used when `--store` is not given.
    pub vector_store_id: Option<String>,
    pub timeout_secs: u64,
    /// Default tracing filter when no log env var is set.
    pub log_level: String,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Column title to width, e.g. `Name = 40`.
    pub column_widths: BTreeMap<String, usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            vector_store_id: None,
            timeout_secs: 60,
            log_level: "warn".to_string(),
            table: TableConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/vsadmin/config.toml` for the current platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vsadmin").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location. An explicit path
    /// must exist; a missing default file yields defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let path = PathBuf::from(shellexpand::tilde(p).to_string());
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read config {}", path.display()))?;
                    Self::from_toml(&text)
                        .with_context(|| format!("Invalid config {}", path.display()))?
                }
                None => Self::default(),
            },
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML")
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
