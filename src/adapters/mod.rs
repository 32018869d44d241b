// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod frame_ffmpeg;
pub mod json_project;
pub mod probe_ffprobe;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FfmpegTrimAdapter;
pub use frame_ffmpeg::FfmpegFrameAdapter;
pub use json_project::JsonProjectAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::{SettingsSource, TomlConfigAdapter};
pub use tracing_log::init_logging;
