// TOML config adapter - Settings persistence using TOML files

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::model::Settings;
use crate::error::{FramemarkError, FramemarkResult};

/// Outcome of [`TomlConfigAdapter::load`]
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    /// Read from the existing file
    File,
    /// No file existed; defaults were written
    Created,
    /// No file existed and writing defaults failed
    NotCreated(String),
    /// The file exists but could not be used; defaults are in effect
    Invalid(String),
}

impl SettingsSource {
    /// Whether saving may replace the file
    pub fn is_writable(&self) -> bool {
        !matches!(self, SettingsSource::Invalid(_))
    }

    /// Emit the load outcome once logging is up
    pub fn log(&self, path: &Path) {
        match self {
            SettingsSource::File => info!(path = %path.display(), "Loaded settings"),
            SettingsSource::Created => info!(path = %path.display(), "Created default settings file"),
            SettingsSource::NotCreated(e) => {
                warn!(path = %path.display(), "Could not write default settings: {}", e)
            }
            SettingsSource::Invalid(e) => warn!(
                path = %path.display(),
                "Invalid settings file, using defaults and leaving it unchanged: {}",
                e
            ),
        }
    }
}

/// TOML configuration adapter
#[derive(Debug, Clone)]
pub struct TomlConfigAdapter {
    config_file_path: PathBuf,
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new(Self::default_config_path())
    }
}

impl TomlConfigAdapter {
    /// Create an adapter bound to one settings file
    pub fn new(config_file_path: impl Into<PathBuf>) -> Self {
        Self {
            config_file_path: config_file_path.into(),
        }
    }

    /// Platform config location for the settings file
    pub fn default_config_path() -> PathBuf {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            PathBuf::from(appdata).join("Framemark").join("config.toml")
        } else if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("framemark").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config").join("framemark").join("config.toml")
        } else {
            // Fallback to current directory
            PathBuf::from("framemark_config.toml")
        }
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_file_path
    }

    /// Parse settings from TOML text; absent keys take their defaults
    pub fn parse(content: &str) -> FramemarkResult<Settings> {
        let settings: Settings = toml::from_str(content)?;
        settings
            .validate()
            .map_err(|e| FramemarkError::ConfigError { message: e.to_string() })?;
        Ok(settings)
    }

    /// Load settings and report where they came from.
    ///
    /// A missing file is created with defaults. A file that cannot be read or
    /// parsed yields defaults and [`SettingsSource::Invalid`]; the file itself
    /// is left untouched. Nothing is logged here because loading runs before
    /// the subscriber exists; see [`SettingsSource::log`].
    pub fn load(&self) -> (Settings, SettingsSource) {
        let path = &self.config_file_path;

        if !path.exists() {
            let settings = Settings::default();
            let source = match self.save(&settings) {
                Ok(()) => SettingsSource::Created,
                Err(e) => SettingsSource::NotCreated(e.to_string()),
            };
            return (settings, source);
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(FramemarkError::from)
            .and_then(|content| Self::parse(&content));

        match loaded {
            Ok(settings) => (settings, SettingsSource::File),
            Err(e) => (Settings::default(), SettingsSource::Invalid(e.to_string())),
        }
    }

    /// Write settings, creating the parent directory when needed
    pub fn save(&self, settings: &Settings) -> FramemarkResult<()> {
        let path = &self.config_file_path;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(settings)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
