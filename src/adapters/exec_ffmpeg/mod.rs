//! FFmpeg execution adapter
//!
//! Cuts a frame range out of a video by running an `ffmpeg` subprocess that
//! re-encodes the selected interval with libx264.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Default upper bound on one trim
pub const DEFAULT_TRIM_TIMEOUT: Duration = Duration::from_secs(600);

/// FFmpeg-based trim adapter
#[derive(Debug, Clone)]
pub struct FfmpegTrimAdapter {
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl Default for FfmpegTrimAdapter {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_TRIM_TIMEOUT)
    }
}

impl FfmpegTrimAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Command-line arguments for trimming `[start_frame, end_frame]`
    pub fn trim_args(
        input: &Path,
        output: &Path,
        start_frame: FrameNumber,
        end_frame: FrameNumber,
        fps: f64,
    ) -> Vec<String> {
        let start_seconds = (start_frame - 1) as f64 / fps;
        let duration_seconds = (end_frame - start_frame + 1) as f64 / fps;

        vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-ss".to_string(),
            format!("{:.6}", start_seconds),
            "-t".to_string(),
            format!("{:.6}", duration_seconds),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            "fast".to_string(),
            "-crf".to_string(),
            "23".to_string(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    fn validate(start_frame: FrameNumber, end_frame: FrameNumber, fps: f64) -> Result<(), DomainError> {
        if !(fps > 0.0) {
            return Err(DomainError::BadArgs(format!("frame rate must be positive, got {}", fps)));
        }
        ExportRange::new(start_frame, end_frame).map(|_| ())
    }
}

#[async_trait]
impl TrimPort for FfmpegTrimAdapter {
    async fn trim(
        &self,
        input: &Path,
        output: &Path,
        start_frame: FrameNumber,
        end_frame: FrameNumber,
        fps: f64,
    ) -> Result<(), DomainError> {
        Self::validate(start_frame, end_frame, fps)?;

        if !input.exists() {
            return Err(DomainError::FileNotFound(input.display().to_string()));
        }

        if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::FsFail(format!("Failed to create output directory: {}", e)))?;
        }

        let args = Self::trim_args(input, output, start_frame, end_frame, fps);
        info!(
            input = %input.display(),
            output = %output.display(),
            start_frame,
            end_frame,
            "Trimming video"
        );
        debug!("ffmpeg {}", args.join(" "));

        let child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let result = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                DomainError::ProcessFail(format!(
                    "ffmpeg timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| DomainError::ProcessFail(format!("Failed to run ffmpeg: {}", e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            warn!(status = %result.status, "ffmpeg trim failed");
            return Err(DomainError::ProcessFail(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            )));
        }

        if !output.exists() {
            return Err(DomainError::ProcessFail(
                "ffmpeg reported success but produced no output file".to_string(),
            ));
        }

        info!(output = %output.display(), "Trimmed video created");
        Ok(())
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
