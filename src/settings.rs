//! Router settings with persistence
//!
//! Settings are saved to `~/.config/questpath/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All router settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub output: OutputSettings,
    pub scenario: ScenarioSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("questpath"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found.
    ///
    /// Runs before logging is set up, so the outcome is returned for the
    /// caller to log once a subscriber is installed.
    pub fn load() -> (Self, LoadReport) {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), LoadReport::NoConfigDir),
        }
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> (Self, LoadReport) {
        if !path.exists() {
            return (Self::default(), LoadReport::Missing(path.to_path_buf()));
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => (settings, LoadReport::Loaded(path.to_path_buf())),
                Err(e) => (Self::default(), LoadReport::ParseFailed(e.to_string())),
            },
            Err(e) => (Self::default(), LoadReport::ReadFailed(e.to_string())),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// What happened while loading settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    Loaded(PathBuf),
    Missing(PathBuf),
    NoConfigDir,
    ReadFailed(String),
    ParseFailed(String),
}

impl LoadReport {
    pub fn log(&self) {
        match self {
            LoadReport::Loaded(path) => info!("Loaded settings from {:?}", path),
            LoadReport::Missing(_) => info!("No settings file found, using defaults"),
            LoadReport::NoConfigDir => warn!("Could not determine config directory"),
            LoadReport::ReadFailed(e) => {
                warn!("Failed to read settings file: {}, using defaults", e)
            }
            LoadReport::ParseFailed(e) => {
                warn!("Failed to parse settings: {}, using defaults", e)
            }
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// How routes are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Print the total travel cost under a text route
    pub show_cost: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_cost: true,
        }
    }
}

/// Scenario settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Scenario file used when none is given on the command line
    pub default_path: Option<PathBuf>,
}
