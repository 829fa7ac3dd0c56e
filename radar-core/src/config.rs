use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::poller::DEFAULT_REFRESH_INTERVAL;

/// Feed endpoint used until one is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8080/api/radar";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// endpoint_url = "https://radar.example.net/api/v1/snapshot"
/// refresh_interval_ms = 30000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote radar feed endpoint. Falls back to [`DEFAULT_ENDPOINT_URL`].
    pub endpoint_url: Option<String>,

    /// Poll interval in milliseconds. Falls back to 30 seconds.
    pub refresh_interval_ms: Option<u64>,
}

impl Config {
    pub fn endpoint_url(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or(DEFAULT_ENDPOINT_URL)
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval_ms
            .map_or(DEFAULT_REFRESH_INTERVAL, Duration::from_millis)
    }

    pub fn set_endpoint_url(&mut self, url: String) {
        self.endpoint_url = Some(url);
    }

    /// Store a refresh interval. Zero is rejected since it would spin the
    /// poll loop.
    pub fn set_refresh_interval_ms(&mut self, ms: u64) -> Result<()> {
        if ms == 0 {
            return Err(anyhow!("Refresh interval must be greater than zero"));
        }
        self.refresh_interval_ms = Some(ms);
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "radar-map", "radar-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
