use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Endpoints of the OpenWeather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    /// Host serving `/data/2.5/weather`.
    pub base_url: String,
    /// Host serving `/img/w/{icon}.png`.
    pub icon_base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            icon_base_url: "https://openweathermap.org".to_string(),
        }
    }
}

/// Top-level configuration read from disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
///
/// [openweather]
/// base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Upper bound for a single HTTP request, in seconds.
    pub timeout_secs: u64,

    pub openweather: OpenWeatherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout_secs: 10,
            openweather: OpenWeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the file key with the value of [`API_KEY_ENV`], if set and non-empty.
    pub fn apply_env(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self = self.with_api_key_override(Some(key));
        }
        self
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Returns the API key, or an error telling the user how to supply one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                let location = Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string());
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: export {API_KEY_ENV}=<key> or add `api_key = \"<key>\"` to {location}."
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
