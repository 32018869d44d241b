use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use framemark::adapters::{FfmpegTrimAdapter, FfprobeAdapter, JsonProjectAdapter};
use framemark::app::{ExportInteractor, ExportOptions, RangeExportRequest};
use framemark::domain::usecases::RangeAnnotator;
use framemark::output::dense::{self, DenseExportBuilder};
use framemark::output::reader;
use framemark::output::{StreamingCsvWriter, TableCsvWriter};
use framemark::ports::ProbePort;
use framemark::*;

/// Test utilities for video processing
mod test_utils {
    use super::*;
    use std::process::Command;

    pub fn ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
            && Command::new("ffprobe")
                .arg("-version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
    }

    /// Create a 2 second 25 fps test video using FFmpeg
    pub fn create_test_video(output_path: &Path) -> Result<(), DomainError> {
        let output = Command::new("ffmpeg")
            .args([
                "-v",
                "error",
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=2:size=160x120:rate=25",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-y",
            ])
            .arg(output_path)
            .output()
            .map_err(|e| DomainError::ProcessFail(format!("Failed to create test video: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::ProcessFail(format!(
                "FFmpeg failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }
        Ok(())
    }
}

fn annotated_store() -> AnnotationStore {
    let mut store = AnnotationStore::new();
    RangeAnnotator::apply(&mut store, 10, 14, "serve");
    RangeAnnotator::apply(&mut store, 40, 42, "rally, long");
    store.set(20, "  net ");
    store
}

#[test]
fn test_project_round_trip_and_dense_export() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("game.json");
    let csv = temp_dir.path().join("game.csv");

    let adapter = JsonProjectAdapter::new();
    let mut store = annotated_store();
    adapter.save(&mut store, &project).unwrap();
    assert!(!store.has_unsaved_changes());

    let loaded = adapter.load(&project).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.get(20), Some("net"));

    let records = DenseExportBuilder::merge(loaded.iter(), 50).unwrap();
    let metrics = StreamingCsvWriter::new(8).write(records, &csv, None);
    assert!(metrics.success);
    assert_eq!(metrics.rows_written, 50);

    let content = std::fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "Frame#,Annotation");
    assert_eq!(lines[1], "1,0");
    assert_eq!(lines[10], "10,serve");
    assert_eq!(lines[20], "20,net");
    assert_eq!(lines[40], "40,\"rally, long\"");
    assert_eq!(lines[50], "50,0");
}

#[test]
fn test_exported_csv_imports_back() {
    let temp_dir = TempDir::new().unwrap();
    let csv = temp_dir.path().join("export.csv");

    let store = annotated_store();
    let records = DenseExportBuilder::merge(store.iter(), 60).unwrap();
    assert!(TableCsvWriter::new().write(records, &csv).success);

    let rows = reader::read_rows(&csv).unwrap();
    assert_eq!(rows.len(), 60);

    let mut imported = AnnotationStore::new();
    imported.set(99, "stale");
    assert!(imported.import_records(rows));
    assert_eq!(imported.all(), store.all());
}

#[test]
fn test_streaming_and_table_writers_agree() {
    let temp_dir = TempDir::new().unwrap();
    let streaming = temp_dir.path().join("streaming.csv");
    let table = temp_dir.path().join("table.csv");

    let records = DenseExportBuilder::merge(annotated_store().iter(), 12_345).unwrap();
    let mut chunks = Vec::new();
    let mut on_chunk = |rows: u64| chunks.push(rows);
    let fast = StreamingCsvWriter::new(1000).write(records.clone(), &streaming, Some(&mut on_chunk));
    let slow = TableCsvWriter::new().write(records, &table);

    assert!(fast.success && slow.success);
    assert_eq!(fast.rows_written, slow.rows_written);
    assert_eq!(std::fs::read(&streaming).unwrap(), std::fs::read(&table).unwrap());
    assert_eq!(chunks.len(), 13);
    assert_eq!(chunks.last(), Some(&12_345));
}

#[test]
fn test_statistics_with_and_without_video_length() {
    let store = annotated_store();

    let sparse = store.statistics();
    assert_eq!(sparse.total_frames, 42);
    assert_eq!(sparse.annotated_frames, 9);

    let dense_stats = dense::record_statistics(&DenseExportBuilder::merge(store.iter(), 100).unwrap());
    assert_eq!(dense_stats.total_frames, 100);
    assert_eq!(dense_stats.annotated_frames, 9);
    assert!((dense_stats.annotation_rate - 0.09).abs() < 1e-9);
}

#[tokio::test]
async fn test_range_export_with_real_ffmpeg() {
    if !test_utils::ffmpeg_available() {
        eprintln!("Skipping test: ffmpeg/ffprobe not available");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let video = temp_dir.path().join("sample.mp4");
    test_utils::create_test_video(&video).unwrap();

    let probe = FfprobeAdapter::default();
    let info = probe.get_info(&video).await.unwrap();
    assert_eq!(info.width, 160);
    assert_eq!(info.height, 120);
    assert!((info.fps - 25.0).abs() < 0.01);

    let interactor = ExportInteractor::new(
        Arc::new(FfmpegTrimAdapter::default()),
        Arc::new(probe),
        ExportOptions::default(),
    );
    let report = interactor
        .export_range_with_video(RangeExportRequest {
            records: DenseExportBuilder::merge(annotated_store().iter(), info.frame_count).unwrap(),
            base_folder: temp_dir.path().to_path_buf(),
            custom_name: None,
            video_path: video.clone(),
            start_frame: 11,
            end_frame: 35,
            fps: info.fps,
        })
        .await;

    assert!(report.success, "{:?}", report.error);
    assert!(report.video_created, "{:?}", report.video_error);

    let folder = temp_dir.path().join("sample_frames_11_to_35");
    assert!(folder.join("sample_frames_11_to_35.mp4").exists());
    let csv = std::fs::read_to_string(folder.join("sample_frames_11_to_35.csv")).unwrap();
    assert_eq!(csv.lines().count(), 26);
    assert!(csv.starts_with("Frame#,Annotation\n11,serve\n"));

    let summary: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(folder.join("sample_frames_11_to_35_summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["original_video"]["resolution"], "160x120");
    assert_eq!(summary["exported_range"]["frame_count"], 25);
    assert_eq!(summary["exported_files"]["video"]["status"], "created");
}
