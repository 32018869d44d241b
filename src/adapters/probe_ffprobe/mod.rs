//! FFprobe adapter
//!
//! Reads video properties from `ffprobe -of json` output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse an ffprobe rate such as `30000/1001` or `25`
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Build [`VideoInfo`] from ffprobe JSON.
///
/// A missing `nb_frames` is estimated as `round(duration * fps)`.
pub fn parse_probe_output(path: &Path, json: &str) -> Result<VideoInfo, DomainError> {
    let output: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::ProbeFail(format!("Unreadable ffprobe output: {}", e)))?;

    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::ProbeFail(format!("No video stream in {}", path.display())))?;

    let fps = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .ok_or_else(|| DomainError::ProbeFail("Missing or invalid frame rate".to_string()))?;

    let duration = output
        .format
        .and_then(|format| format.duration)
        .and_then(|duration| duration.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let frame_count = stream
        .nb_frames
        .and_then(|frames| frames.trim().parse::<i64>().ok())
        .unwrap_or_else(|| (duration * fps).round() as i64);

    Ok(VideoInfo {
        path: path.to_path_buf(),
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        fps,
        frame_count,
        duration,
    })
}

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FfprobeAdapter {
    ffprobe_path: PathBuf,
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn get_info(&self, path: &Path) -> Result<VideoInfo, DomainError> {
        if !path.exists() {
            return Err(DomainError::FileNotFound(path.display().to_string()));
        }

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,r_frame_rate,nb_frames:format=duration",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::ProcessFail(format!("Failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let info = parse_probe_output(path, &String::from_utf8_lossy(&output.stdout))?;
        debug!(
            path = %path.display(),
            resolution = %info.resolution(),
            fps = info.fps,
            frames = info.frame_count,
            "Probed video"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("24"), Some(24.0));
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("abc"), None);
    }

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{
            "streams": [{"width": 1920, "height": 1080, "r_frame_rate": "30/1", "nb_frames": "300"}],
            "format": {"duration": "10.000000"}
        }"#;
        let info = parse_probe_output(Path::new("clip.mp4"), json).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.fps, 30.0);
        assert_eq!(info.frame_count, 300);
        assert_eq!(info.duration, 10.0);
    }

    #[test]
    fn test_frame_count_estimated_from_duration() {
        let json = r#"{
            "streams": [{"width": 640, "height": 480, "r_frame_rate": "25/1"}],
            "format": {"duration": "4.04"}
        }"#;
        let info = parse_probe_output(Path::new("clip.mkv"), json).unwrap();
        assert_eq!(info.frame_count, 101);
    }

    #[test]
    fn test_parse_probe_output_without_video_stream() {
        let result = parse_probe_output(Path::new("audio.mp3"), r#"{"streams": [], "format": {}}"#);
        assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let adapter = FfprobeAdapter::default();
        let result = adapter.get_info(Path::new("/no/such/video.mp4")).await;
        assert!(matches!(result, Err(DomainError::FileNotFound(_))));
    }
}
