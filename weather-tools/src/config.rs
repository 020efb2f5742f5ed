use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";
pub const BIND_ENV: &str = "WEATHER_BIND";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// bind = "0.0.0.0:8787"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key shared by every tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for a single upstream request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Socket address the HTTP router listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Returns the API key, or an error explaining how to configure one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather-server configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace the stored API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from the platform config path, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-tools", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind = bind;
        }
        self
    }
}
