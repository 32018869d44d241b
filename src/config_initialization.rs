//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::{SettingsSource, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::model::{ExportMethod, Settings, SummaryFormat};
use crate::error::FramemarkResult;

/// Environment variables and the settings they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("FRAMEMARK_LOG_LEVEL", "log_level"),
    ("FRAMEMARK_JSON_LOGS", "json_logs"),
    ("FRAMEMARK_CHUNK_SIZE", "chunk_size"),
    ("FRAMEMARK_EXPORT_METHOD", "export_method"),
    ("FRAMEMARK_SUMMARY_FORMAT", "summary_format"),
    ("FRAMEMARK_FFMPEG_PATH", "ffmpeg_path"),
    ("FRAMEMARK_FFPROBE_PATH", "ffprobe_path"),
    ("FRAMEMARK_TRIM_TIMEOUT_SECS", "trim_timeout_secs"),
];

/// Settings for one run: what the file holds and what this run uses.
///
/// Environment and CLI overrides only touch the effective copy, so they are
/// never written back. Session state such as recent files is recorded in
/// both and saved on shutdown, unless the file could not be parsed.
#[derive(Debug)]
pub struct SettingsSession {
    adapter: TomlConfigAdapter,
    source: SettingsSource,
    persisted: Settings,
    effective: Settings,
}

impl SettingsSession {
    pub fn new(
        adapter: TomlConfigAdapter,
        source: SettingsSource,
        persisted: Settings,
        effective: Settings,
    ) -> Self {
        Self {
            adapter,
            source,
            persisted,
            effective,
        }
    }

    /// Load the file and start a session with no overrides applied
    pub fn open(adapter: TomlConfigAdapter) -> Self {
        let (persisted, source) = adapter.load();
        let effective = persisted.clone();
        Self::new(adapter, source, persisted, effective)
    }

    pub fn source(&self) -> &SettingsSource {
        &self.source
    }

    /// Log how the settings file was loaded; call after logging is initialized
    pub fn log_source(&self) {
        self.source.log(self.config_path());
    }

    pub fn effective(&self) -> &Settings {
        &self.effective
    }

    pub fn persisted(&self) -> &Settings {
        &self.persisted
    }

    pub fn config_path(&self) -> &Path {
        self.adapter.config_file_path()
    }

    /// Record a video that was opened
    pub fn remember_video(&mut self, video: &Path) {
        let file = video.display().to_string();
        let directory = video
            .parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default();
        for settings in [&mut self.persisted, &mut self.effective] {
            settings.add_recent_file(&file);
            if !directory.is_empty() {
                settings.set_last_video_directory(directory.clone());
            }
        }
    }

    /// Record the folder an export went to
    pub fn remember_export_directory(&mut self, directory: &Path) {
        let directory = directory.display().to_string();
        self.persisted.set_last_export_directory(directory.clone());
        self.effective.set_last_export_directory(directory);
    }

    /// Write the persisted settings back to the file.
    ///
    /// An unparsable file is never overwritten; returns whether it was written.
    pub fn save(&self) -> FramemarkResult<bool> {
        if !self.source.is_writable() {
            warn!(path = %self.config_path().display(), "Settings file is invalid, not saving");
            return Ok(false);
        }
        self.adapter.save(&self.persisted)?;
        info!(path = %self.config_path().display(), "Settings saved");
        Ok(true)
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<SettingsSession> {
    let adapter = match &cli.config {
        Some(path) => TomlConfigAdapter::new(path),
        None => TomlConfigAdapter::default(),
    };

    // Steps 1-2: defaults, then the settings file
    let mut session = SettingsSession::open(adapter);

    // Step 3: environment variables
    apply_environment_overrides(&mut session.effective, |key| std::env::var(key).ok());

    // Step 4: command-line arguments
    apply_cli_overrides(&mut session.effective, cli)?;

    session
        .effective
        .validate()
        .context("Invalid effective configuration")?;

    Ok(session)
}

/// Apply `FRAMEMARK_*` overrides read through `lookup`.
///
/// Unparsable values are skipped with a warning. Returns how many applied.
pub fn apply_environment_overrides<F>(settings: &mut Settings, lookup: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;
    for (env_var, key) in ENV_MAPPINGS {
        let Some(value) = lookup(env_var) else {
            continue;
        };
        match apply_setting(settings, key, &value) {
            Ok(()) => {
                info!("Found environment override: {} = {}", env_var, value);
                applied += 1;
            }
            Err(e) => warn!("Ignoring {}: {}", env_var, e),
        }
    }

    if applied > 0 {
        info!("Applied {} environment variable overrides", applied);
    }
    applied
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        "log_level" => settings.log_level = value.to_lowercase(),
        "json_logs" => settings.json_logs = parse_flag(value)?,
        "chunk_size" => settings.chunk_size = value.parse().context("expected a positive integer")?,
        "export_method" => settings.export_method = ExportMethod::parse(value)?,
        "summary_format" => settings.summary_format = SummaryFormat::parse(value)?,
        "ffmpeg_path" => settings.ffmpeg_path = value.to_string(),
        "ffprobe_path" => settings.ffprobe_path = value.to_string(),
        "trim_timeout_secs" => {
            settings.trim_timeout_secs = value.parse().context("expected a number of seconds")?
        }
        _ => anyhow::bail!("unknown setting {}", key),
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected true or false, got {}", value),
    }
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) -> Result<usize> {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        settings.log_level = level.to_lowercase();
        cli_overrides += 1;
    }
    if cli.json_logs {
        settings.json_logs = true;
        cli_overrides += 1;
    }

    match &cli.command {
        Commands::Export(args) => {
            if let Some(method) = &args.method {
                settings.export_method = ExportMethod::parse(method)?;
                cli_overrides += 1;
            }
            if let Some(chunk_size) = args.chunk_size {
                settings.chunk_size = chunk_size;
                cli_overrides += 1;
            }
        }
        Commands::ExportClip(args) => {
            if let Some(format) = &args.summary_format {
                settings.summary_format = SummaryFormat::parse(format)?;
                cli_overrides += 1;
            }
        }
        _ => {}
    }

    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }
    Ok(cli_overrides)
}
