// Export interactor - Orchestrates the range export use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::output::{DenseExportBuilder, ExportSummary, StreamingCsvWriter, TableCsvWriter};
use crate::ports::*;

/// Writer and summary choices for range exports
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub chunk_size: usize,
    pub method: ExportMethod,
    pub summary_format: SummaryFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ExportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            method: settings.export_method,
            summary_format: settings.summary_format,
        }
    }
}

/// Export of one frame range into its own folder
#[derive(Debug, Clone)]
pub struct RangeExportRequest {
    /// Dense (or any) per-frame records; filtered to the range before writing
    pub records: Vec<ExportRecord>,
    pub base_folder: PathBuf,
    pub custom_name: Option<String>,
    pub video_path: PathBuf,
    pub start_frame: FrameNumber,
    pub end_frame: FrameNumber,
    pub fps: f64,
}

/// Outcome of a range export.
///
/// `success` follows the CSV alone; the video is best-effort and the summary
/// is written only after a successful CSV.
#[derive(Debug, Clone, Default)]
pub struct RangeExportReport {
    pub success: bool,
    pub error: Option<String>,
    pub output_folder: Option<PathBuf>,
    pub video_path: Option<PathBuf>,
    pub video_created: bool,
    pub video_error: Option<String>,
    pub csv_path: Option<PathBuf>,
    pub csv_metrics: Option<ExportMetrics>,
    pub summary_path: Option<PathBuf>,
    pub summary: Option<ExportSummary>,
}

impl RangeExportReport {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Interactor for the range export use case
pub struct ExportInteractor {
    trim_port: Arc<dyn TrimPort>,
    probe_port: Arc<dyn ProbePort>,
    options: ExportOptions,
}

impl ExportInteractor {
    /// Create new export interactor with injected ports
    pub fn new(trim_port: Arc<dyn TrimPort>, probe_port: Arc<dyn ProbePort>, options: ExportOptions) -> Self {
        Self {
            trim_port,
            probe_port,
            options,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Produce `{video, csv, summary}` for a frame range under one base name.
    ///
    /// Invalid input writes nothing. A failed trim is recorded and the CSV and
    /// summary are still produced.
    pub async fn export_range_with_video(&self, request: RangeExportRequest) -> RangeExportReport {
        let range = match Self::validate(&request) {
            Ok(range) => range,
            Err(e) => {
                warn!("Rejected range export: {}", e);
                return RangeExportReport::failed(e.to_string());
            }
        };

        let naming = OutputNaming::derive(request.custom_name.as_deref(), &request.video_path, &range);
        let folder = request.base_folder.join(naming.folder_name());
        if let Err(e) = tokio::fs::create_dir_all(&folder).await {
            error!(folder = %folder.display(), "Failed to create export folder: {}", e);
            return RangeExportReport::failed(
                DomainError::FsFail(format!("Failed to create {}: {}", folder.display(), e)).to_string(),
            );
        }
        info!(folder = %folder.display(), range = %range, "Exporting frame range");

        let video_path = folder.join(naming.video_file());
        let video_error = self
            .trim_port
            .trim(&request.video_path, &video_path, range.start_frame, range.end_frame, request.fps)
            .await
            .err()
            .map(|e| e.to_string());
        let video_created = video_error.is_none();
        if let Some(e) = &video_error {
            warn!("Failed to create trimmed video, continuing with data export: {}", e);
        }

        let sliced = DenseExportBuilder::slice(&request.records, range.start_frame, range.end_frame);
        let annotation_count = sliced.len() as u64;
        let csv_path = folder.join(naming.csv_file());
        let metrics = self.write_csv(sliced, csv_path.clone()).await;

        let mut report = RangeExportReport {
            success: metrics.success,
            error: metrics.error.clone(),
            output_folder: Some(folder.clone()),
            video_path: Some(video_path),
            video_created,
            video_error,
            csv_path: Some(csv_path),
            csv_metrics: Some(metrics),
            ..RangeExportReport::default()
        };

        if !report.success {
            error!("CSV export failed: {}", report.error.as_deref().unwrap_or("unknown error"));
            return report;
        }

        let video_info = match self.probe_port.get_info(&request.video_path).await {
            Ok(info) => Some(info),
            Err(e) => {
                debug!("Video metadata unavailable for summary: {}", e);
                None
            }
        };
        let format = self.options.summary_format;
        let summary = ExportSummary::new(
            &request.video_path,
            video_info.as_ref(),
            &range,
            request.fps,
            annotation_count,
            video_created,
            format,
        );
        let summary_path = folder.join(naming.summary_file(format));
        match summary.write(&summary_path, format) {
            Ok(()) => report.summary_path = Some(summary_path),
            Err(e) => warn!("Error creating summary file: {}", e),
        }
        report.summary = Some(summary);

        info!(folder = %folder.display(), video_created, "Range export completed");
        report
    }

    fn validate(request: &RangeExportRequest) -> Result<ExportRange, DomainError> {
        if !(request.fps > 0.0) {
            return Err(DomainError::BadArgs(format!(
                "frame rate must be positive, got {}",
                request.fps
            )));
        }
        ExportRange::new(request.start_frame, request.end_frame)
    }

    /// Run the configured writer off the async runtime
    async fn write_csv(&self, records: Vec<ExportRecord>, path: PathBuf) -> ExportMetrics {
        let options = self.options.clone();
        let task = tokio::task::spawn_blocking(move || Self::write_blocking(&options, records, &path));

        match task.await {
            Ok(metrics) => metrics,
            Err(e) => ExportMetrics::failed(self.options.method, 0.0, format!("CSV export task failed: {}", e)),
        }
    }

    fn write_blocking(options: &ExportOptions, records: Vec<ExportRecord>, path: &Path) -> ExportMetrics {
        match options.method {
            ExportMethod::Streaming => {
                let mut on_chunk = |rows: u64| debug!(rows, "CSV export progress");
                StreamingCsvWriter::new(options.chunk_size).write(records, path, Some(&mut on_chunk))
            }
            ExportMethod::Table => TableCsvWriter::new().write(records, path),
        }
    }
}

#[cfg(test)]
mod tests;
