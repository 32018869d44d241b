//! Single-frame extraction through an `ffmpeg` subprocess

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::probe_ffprobe::FfprobeAdapter;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Decodes one frame to PNG by seeking to `(n - 1) / fps`
#[derive(Debug, Clone)]
pub struct FfmpegFrameAdapter {
    ffmpeg_path: PathBuf,
    probe: FfprobeAdapter,
}

impl Default for FfmpegFrameAdapter {
    fn default() -> Self {
        Self::new("ffmpeg", FfprobeAdapter::default())
    }
}

impl FfmpegFrameAdapter {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, probe: FfprobeAdapter) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            probe,
        }
    }

    /// Arguments that write frame `frame_number` as PNG to stdout
    pub fn frame_args(path: &Path, info: &VideoInfo, frame_number: FrameNumber) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{:.6}", info.timestamp_of(frame_number)),
            "-i".to_string(),
            path.to_string_lossy().to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-f".to_string(),
            "image2pipe".to_string(),
            "-vcodec".to_string(),
            "png".to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl FramePort for FfmpegFrameAdapter {
    async fn get_frame(&self, path: &Path, frame_number: FrameNumber) -> Result<Frame, DomainError> {
        let info = self.probe.get_info(path).await?;
        if frame_number < 1 || frame_number > info.frame_count {
            return Err(DomainError::InvalidRange(format!(
                "frame {} outside 1..={}",
                frame_number, info.frame_count
            )));
        }

        let output = Command::new(&self.ffmpeg_path)
            .args(Self::frame_args(path, &info, frame_number))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::ProcessFail(format!("Failed to run ffmpeg: {}", e)))?;

        if !output.status.success() || output.stdout.is_empty() {
            return Err(DomainError::ProcessFail(format!(
                "Failed to decode frame {} from {}: {}",
                frame_number,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!(frame_number, bytes = output.stdout.len(), "Decoded frame");
        Ok(Frame {
            frame_number,
            png: output.stdout,
        })
    }
}
