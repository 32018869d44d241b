//! Export summary record and its JSON / plain-text renderings

use std::fmt::Write as _;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::model::*;
use crate::error::FramemarkResult;
use crate::utils::Utils;

/// Outcome of one exported artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Created,
    Failed,
}

impl ArtifactStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            ArtifactStatus::Created
        } else {
            ArtifactStatus::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactStatus::Created => "created",
            ArtifactStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub export_date: String,
    pub export_type: String,
}

/// Source video metadata; every field is `None` when the probe failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalVideo {
    pub filename: String,
    pub full_path: String,
    pub resolution: Option<String>,
    pub fps: Option<f64>,
    pub total_frames: Option<i64>,
    pub total_duration: Option<String>,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRange {
    pub start_frame: FrameNumber,
    pub end_frame: FrameNumber,
    pub frame_count: i64,
    pub duration: String,
    pub duration_seconds: f64,
    pub fps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoArtifact {
    pub status: ArtifactStatus,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvArtifact {
    pub status: ArtifactStatus,
    pub success: bool,
    pub annotation_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryArtifact {
    pub status: ArtifactStatus,
    pub success: bool,
    pub format: SummaryFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFiles {
    pub video: VideoArtifact,
    pub csv: CsvArtifact,
    pub summary: SummaryArtifact,
}

/// Everything recorded about one range export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub export_info: ExportInfo,
    pub original_video: OriginalVideo,
    pub exported_range: ExportedRange,
    pub exported_files: ExportedFiles,
    pub notes: Vec<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ExportSummary {
    /// Build a summary stamped with the current local time.
    ///
    /// Only written after the CSV succeeded, so the csv and summary entries
    /// are always `created`.
    pub fn new(
        video_path: &Path,
        video_info: Option<&VideoInfo>,
        range: &ExportRange,
        fps: f64,
        annotation_count: u64,
        video_success: bool,
        format: SummaryFormat,
    ) -> Self {
        let duration_seconds = range.duration_seconds(fps);

        Self {
            export_info: ExportInfo {
                export_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                export_type: "video_annotation_export".to_string(),
            },
            original_video: OriginalVideo {
                filename: video_path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
                full_path: video_path.display().to_string(),
                resolution: video_info.map(VideoInfo::resolution),
                fps: video_info.map(|info| round2(info.fps)),
                total_frames: video_info.map(|info| info.frame_count),
                total_duration: video_info.map(|info| Utils::format_duration(info.duration)),
                duration_seconds: video_info.map(|info| info.duration),
            },
            exported_range: ExportedRange {
                start_frame: range.start_frame,
                end_frame: range.end_frame,
                frame_count: range.frame_count(),
                duration: Utils::format_duration(duration_seconds),
                duration_seconds,
                fps: round2(fps),
            },
            exported_files: ExportedFiles {
                video: VideoArtifact {
                    status: ArtifactStatus::from_success(video_success),
                    success: video_success,
                },
                csv: CsvArtifact {
                    status: ArtifactStatus::Created,
                    success: true,
                    annotation_count,
                },
                summary: SummaryArtifact {
                    status: ArtifactStatus::Created,
                    success: true,
                    format,
                },
            },
            notes: vec![
                "The trimmed video contains only the specified frame range".to_string(),
                "The CSV file contains annotations for the specified frame range only".to_string(),
                "All files are located in the same folder for easy access".to_string(),
            ],
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> FramemarkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fixed-layout plain-text report
    pub fn to_text(&self) -> String {
        let video = &self.original_video;
        let range = &self.exported_range;
        let files = &self.exported_files;
        let unknown = || "unknown".to_string();

        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "VIDEO ANNOTATION EXPORT SUMMARY");
        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(out, "Export Date: {}", self.export_info.export_date);
        let _ = writeln!(out);
        let _ = writeln!(out, "ORIGINAL VIDEO");
        let _ = writeln!(out, "  File: {}", video.filename);
        let _ = writeln!(out, "  Path: {}", video.full_path);
        let _ = writeln!(out, "  Resolution: {}", video.resolution.clone().unwrap_or_else(unknown));
        let _ = writeln!(out, "  FPS: {}", video.fps.map(|fps| format!("{:.2}", fps)).unwrap_or_else(unknown));
        let _ = writeln!(
            out,
            "  Total Frames: {}",
            video.total_frames.map(|frames| frames.to_string()).unwrap_or_else(unknown)
        );
        let _ = writeln!(out, "  Total Duration: {}", video.total_duration.clone().unwrap_or_else(unknown));
        let _ = writeln!(out);
        let _ = writeln!(out, "EXPORTED RANGE");
        let _ = writeln!(
            out,
            "  Frames: {} - {} ({} frames)",
            range.start_frame, range.end_frame, range.frame_count
        );
        let _ = writeln!(out, "  Duration: {} ({:.3}s)", range.duration, range.duration_seconds);
        let _ = writeln!(out, "  FPS: {:.2}", range.fps);
        let _ = writeln!(out);
        let _ = writeln!(out, "EXPORTED FILES");
        let _ = writeln!(out, "  Video: {}", files.video.status.as_str());
        let _ = writeln!(
            out,
            "  CSV: {} ({} annotations)",
            files.csv.status.as_str(),
            files.csv.annotation_count
        );
        let _ = writeln!(out, "  Summary: {}", files.summary.status.as_str());
        let _ = writeln!(out);
        let _ = writeln!(out, "NOTES");
        for note in &self.notes {
            let _ = writeln!(out, "  - {}", note);
        }
        out
    }

    /// Render in the requested format and write to `path`
    pub fn write(&self, path: &Path, format: SummaryFormat) -> FramemarkResult<()> {
        let content = match format {
            SummaryFormat::Json => self.to_json()?,
            SummaryFormat::Text => self.to_text(),
        };
        std::fs::write(path, content)?;
        info!(path = %path.display(), "Summary file created");
        Ok(())
    }
}
