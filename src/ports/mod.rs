// Ports - Interface definitions for external video collaborators

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for cutting a frame range out of a video
#[async_trait]
pub trait TrimPort: Send + Sync {
    /// Write frames `[start_frame, end_frame]` of `input` to `output`
    async fn trim(
        &self,
        input: &Path,
        output: &Path,
        start_frame: FrameNumber,
        end_frame: FrameNumber,
        fps: f64,
    ) -> Result<(), DomainError>;

    /// Check whether the trimming backend can run at all
    async fn is_available(&self) -> bool;
}

/// Port for reading video properties
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Dimensions, frame rate, frame count and duration of a video
    async fn get_info(&self, path: &Path) -> Result<VideoInfo, DomainError>;
}

/// Port for retrieving decoded frames
#[async_trait]
pub trait FramePort: Send + Sync {
    /// Decode a 1-based frame; fails for frames outside the video
    async fn get_frame(&self, path: &Path, frame_number: FrameNumber) -> Result<Frame, DomainError>;
}
