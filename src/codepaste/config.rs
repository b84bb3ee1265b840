//! # Configuration
//!
//! Codepaste needs one thing to run: the base URL of the snippet API.
//!
//! ## Resolution Order
//!
//! 1. **Command line**: `--base-url` (applied by the CLI via [`CodepasteConfig::with_base_url`])
//! 2. **Environment**: `CODEPASTE_BASE_URL`, `CODEPASTE_TIMEOUT_SECS`
//! 3. **Config file**: `config.json` in the user config directory
//! 4. **Defaults**: no base URL, 10 second timeout
//!
//! A missing base URL is a configuration error and blocks every remote call.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base-url` | none | Root of the snippet API, e.g. `http://localhost:5000` |
//! | `timeout-secs` | `10` | Per-request timeout |

use crate::error::{CodepasteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "CODEPASTE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CODEPASTE_TIMEOUT_SECS";
pub const ENV_CONFIG_DIR: &str = "CODEPASTE_CONFIG_DIR";

/// Keys accepted by `codepaste config`.
pub const KEYS: &[&str] = &["base-url", "timeout-secs"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodepasteConfig {
    /// Root URL of the snippet API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CodepasteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Directory holding `config.json`. `CODEPASTE_CONFIG_DIR` overrides the OS default.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    ProjectDirs::from("com", "codepaste", "codepaste")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CodepasteError::Configuration("could not determine config directory".to_string())
        })
}

impl CodepasteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            CodepasteError::Configuration(format!("reading {}: {}", config_path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CodepasteError::Configuration(format!("parsing {}: {}", config_path.display(), e))
        })
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        let io_err = |e: std::io::Error| {
            CodepasteError::Configuration(format!("writing {}: {}", config_dir.display(), e))
        };

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CodepasteError::Configuration(e.to_string()))?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(io_err)?;
        Ok(())
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Set-but-blank variables count as unset.
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = present(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(raw) = present(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_timeout(&raw)?;
        }
        Ok(self)
    }

    pub fn with_process_env(self) -> Result<Self> {
        self.with_env(|key| std::env::var(key).ok())
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = Some(url);
        }
        self
    }

    /// The normalized base URL, or a configuration error when absent or malformed.
    pub fn resolve_base_url(&self) -> Result<String> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                CodepasteError::Configuration(format!(
                    "no base URL configured; set {} or run `codepaste config base-url <url>`",
                    ENV_BASE_URL
                ))
            })?;

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(CodepasteError::Configuration(format!(
                "base URL must start with http:// or https://, got '{}'",
                raw
            )));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "base-url" => Ok(self.base_url.clone().unwrap_or_default()),
            "timeout-secs" => Ok(self.timeout_secs.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" => {
                self.base_url = Some(value.to_string());
                self.resolve_base_url()?;
            }
            "timeout-secs" => self.timeout_secs = parse_timeout(value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(CodepasteError::Configuration(format!(
            "timeout must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}

fn unknown_key(key: &str) -> CodepasteError {
    CodepasteError::Configuration(format!(
        "unknown config key '{}' (expected one of: {})",
        key,
        KEYS.join(", ")
    ))
}
