use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{client::WeatherClient, options::Options};

/// Client defaults stored on disk.
///
/// Example TOML:
/// ```toml
/// key = "..."
/// language = "en"
/// units = "metric"
/// location_name = "Paris"
/// ```
/// or, instead of `location_name`:
/// ```toml
/// [coordinates]
/// lat = 48.85
/// lon = 2.35
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub options: Options,
}

impl Config {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Load config from the platform config directory, or return empty
    /// options if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let value: serde_json::Value = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let options = Options::from_json(&value)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(Self { options })
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&self.options)
            .context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "openweather-core")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn into_client(self) -> WeatherClient {
        WeatherClient::new(self.options)
    }
}
