// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

mod row;
mod settings;
mod tracking;

pub use row::{ExportKind, Row};
pub use settings::Settings;
pub use tracking::{BoundingBox, Detection, FrameSide, TrackingRecord};

/// 1-based index of a video frame
pub type FrameNumber = i64;

/// Column holding the frame number in every export kind
pub const FRAME_FIELD: &str = "Frame#";
/// Column holding the annotation text
pub const ANNOTATION_FIELD: &str = "Annotation";
/// Export value written for frames without an annotation
pub const DEFAULT_ANNOTATION: &str = "0";
/// Highest frame accepted from user input when the video length is unknown
/// (about 46 hours at 60 fps)
pub const MAX_FRAME_NUMBER: FrameNumber = 10_000_000;
/// Extensions recognised as video files (lowercase, without dot)
pub const SUPPORTED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// One row of a dense annotation export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub frame_number: FrameNumber,
    pub annotation: String,
}

impl ExportRecord {
    /// Create a record for a frame
    pub fn new(frame_number: FrameNumber, annotation: impl Into<String>) -> Self {
        Self {
            frame_number,
            annotation: annotation.into(),
        }
    }

    /// Create a record carrying the default "no annotation" value
    pub fn unannotated(frame_number: FrameNumber) -> Self {
        Self::new(frame_number, DEFAULT_ANNOTATION)
    }

    /// Whether this record carries a substantive annotation
    pub fn is_annotated(&self) -> bool {
        self.annotation != DEFAULT_ANNOTATION
    }
}

/// Inclusive frame range selected for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRange {
    pub start_frame: FrameNumber,
    pub end_frame: FrameNumber,
}

impl ExportRange {
    /// Create a new range, requiring 1 <= start <= end
    pub fn new(start_frame: FrameNumber, end_frame: FrameNumber) -> Result<Self, DomainError> {
        if start_frame < 1 {
            return Err(DomainError::InvalidRange(format!(
                "start frame must be at least 1, got {}",
                start_frame
            )));
        }
        if end_frame < start_frame {
            return Err(DomainError::InvalidRange(format!(
                "end frame {} is before start frame {}",
                end_frame, start_frame
            )));
        }
        Ok(Self {
            start_frame,
            end_frame,
        })
    }

    /// Create a range that must also fit inside a video of `total_frames`
    pub fn within(
        start_frame: FrameNumber,
        end_frame: FrameNumber,
        total_frames: FrameNumber,
    ) -> Result<Self, DomainError> {
        let range = Self::new(start_frame, end_frame)?;
        if end_frame > total_frames {
            return Err(DomainError::InvalidRange(format!(
                "end frame {} exceeds total frame count {}",
                end_frame, total_frames
            )));
        }
        Ok(range)
    }

    /// Number of frames covered
    pub fn frame_count(&self) -> i64 {
        self.end_frame - self.start_frame + 1
    }

    /// Check whether a frame lies inside the range
    pub fn contains(&self, frame: FrameNumber) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }

    /// Playback duration of the range at the given frame rate
    pub fn duration_seconds(&self, fps: f64) -> f64 {
        if fps <= 0.0 {
            return 0.0;
        }
        self.frame_count() as f64 / fps
    }

    /// Offset of the first frame from the start of the video
    pub fn start_seconds(&self, fps: f64) -> f64 {
        if fps <= 0.0 {
            return 0.0;
        }
        (self.start_frame - 1) as f64 / fps
    }
}

impl fmt::Display for ExportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_frame, self.end_frame)
    }
}

/// CSV writer implementation used for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethod {
    /// Chunked incremental writer
    Streaming,
    /// Whole-table-in-memory baseline
    Table,
}

impl ExportMethod {
    /// Parse export method from string
    pub fn parse(method: &str) -> Result<Self, DomainError> {
        match method.trim().to_lowercase().as_str() {
            "streaming" | "fast" => Ok(ExportMethod::Streaming),
            "table" | "baseline" => Ok(ExportMethod::Table),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid export method: {}. Valid methods: streaming, table",
                method
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMethod::Streaming => "streaming",
            ExportMethod::Table => "table",
        }
    }
}

/// Timing and row-count diagnostics produced by a CSV write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetrics {
    pub success: bool,
    pub method: ExportMethod,
    pub rows_written: u64,
    pub duration_seconds: f64,
    /// Worst observed uninterrupted write burst between yield points
    pub max_block_seconds: f64,
    pub chunk_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportMetrics {
    /// Metrics for a write that produced nothing usable
    pub fn failed(method: ExportMethod, duration_seconds: f64, error: impl Into<String>) -> Self {
        Self {
            success: false,
            method,
            rows_written: 0,
            duration_seconds,
            max_block_seconds: 0.0,
            chunk_count: 0,
            error: Some(error.into()),
        }
    }
}

/// Annotation coverage figures for a status display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStatistics {
    pub total_frames: i64,
    pub annotated_frames: i64,
    pub annotation_rate: f64,
}

impl AnnotationStatistics {
    pub fn new(total_frames: i64, annotated_frames: i64) -> Self {
        let annotation_rate = if total_frames > 0 {
            annotated_frames as f64 / total_frames as f64
        } else {
            0.0
        };
        Self {
            total_frames,
            annotated_frames,
            annotation_rate,
        }
    }
}

/// Video properties reported by the probe collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub frame_count: i64,
    pub duration: f64,
}

impl VideoInfo {
    /// Width over height, 0 when the height is unknown
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Time covered by a single frame
    pub fn frame_time(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }

    /// Timestamp of a 1-based frame; 0 for frames outside the video
    pub fn timestamp_of(&self, frame: FrameNumber) -> f64 {
        if frame < 1 || frame > self.frame_count || self.fps <= 0.0 {
            return 0.0;
        }
        (frame - 1) as f64 / self.fps
    }

    /// Frame shown at a timestamp; frame 1 for timestamps outside the video
    pub fn frame_at(&self, seconds: f64) -> FrameNumber {
        if seconds < 0.0 || seconds > self.duration {
            return 1;
        }
        (seconds * self.fps) as FrameNumber + 1
    }

    /// "WIDTHxHEIGHT"
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// A single decoded frame, PNG encoded
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub frame_number: FrameNumber,
    pub png: Vec<u8>,
}

/// Layout of the export summary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    Json,
    Text,
}

impl SummaryFormat {
    /// Parse summary format from string
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.trim().to_lowercase().as_str() {
            "json" => Ok(SummaryFormat::Json),
            "text" | "txt" => Ok(SummaryFormat::Text),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid summary format: {}. Valid formats: json, text",
                format
            ))),
        }
    }

    /// File extension used for the summary file
    pub fn extension(&self) -> &'static str {
        match self {
            SummaryFormat::Json => "json",
            SummaryFormat::Text => "txt",
        }
    }
}

#[cfg(test)]
mod tests;
