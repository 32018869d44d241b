// Application settings - passed explicitly from startup to shutdown

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{ExportMethod, SummaryFormat, DEFAULT_ANNOTATION};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// User-level settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub json_logs: bool,
    /// Rows written between yields to the caller
    pub chunk_size: usize,
    pub export_method: ExportMethod,
    pub summary_format: SummaryFormat,
    /// Viewer preference kept for settings-file compatibility. Exports always
    /// write [`DEFAULT_ANNOTATION`] for unannotated frames, since "0" is also
    /// the clearing value.
    pub default_annotation: String,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub trim_timeout_secs: u64,
    pub recent_files: Vec<String>,
    pub max_recent_files: usize,
    pub last_video_directory: String,
    pub last_export_directory: String,
    // Viewer preferences kept for settings-file compatibility; no command reads them
    pub auto_save_interval_secs: u64,
    pub show_frame_numbers: bool,
    pub show_timestamps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            chunk_size: 5000,
            export_method: ExportMethod::Streaming,
            summary_format: SummaryFormat::Json,
            default_annotation: DEFAULT_ANNOTATION.to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            trim_timeout_secs: 600,
            recent_files: Vec::new(),
            max_recent_files: 10,
            last_video_directory: String::new(),
            last_export_directory: String::new(),
            auto_save_interval_secs: 30,
            show_frame_numbers: true,
            show_timestamps: true,
        }
    }
}

impl Settings {
    /// Put a file at the front of the recent list, dropping duplicates and overflow
    pub fn add_recent_file(&mut self, file_path: &str) {
        if file_path.is_empty() {
            return;
        }
        self.recent_files.retain(|existing| existing != file_path);
        self.recent_files.insert(0, file_path.to_string());
        self.recent_files.truncate(self.max_recent_files);
    }

    pub fn recent_files(&self) -> &[String] {
        &self.recent_files
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    pub fn last_video_directory(&self) -> &str {
        &self.last_video_directory
    }

    pub fn set_last_video_directory(&mut self, directory: impl Into<String>) {
        self.last_video_directory = directory.into();
    }

    pub fn last_export_directory(&self) -> &str {
        &self.last_export_directory
    }

    pub fn set_last_export_directory(&mut self, directory: impl Into<String>) {
        self.last_export_directory = directory.into();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<(), DomainError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.chunk_size == 0 {
            return Err(DomainError::BadArgs(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.trim_timeout_secs == 0 {
            return Err(DomainError::BadArgs(
                "trim_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
