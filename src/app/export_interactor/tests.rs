// Unit tests for the export interactor

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::app::export_interactor::*;
    use crate::domain::errors::DomainError;
    use crate::domain::model::*;
    use crate::output::DenseExportBuilder;
    use crate::ports::*;

    struct MockTrim {
        succeed: bool,
        calls: Mutex<Vec<(PathBuf, FrameNumber, FrameNumber)>>,
    }

    impl MockTrim {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TrimPort for MockTrim {
        async fn trim(
            &self,
            _input: &Path,
            output: &Path,
            start_frame: FrameNumber,
            end_frame: FrameNumber,
            _fps: f64,
        ) -> Result<(), DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((output.to_path_buf(), start_frame, end_frame));
            if self.succeed {
                std::fs::write(output, b"video").unwrap();
                Ok(())
            } else {
                Err(DomainError::ProcessFail("encoder crashed".to_string()))
            }
        }

        async fn is_available(&self) -> bool {
            self.succeed
        }
    }

    struct MockProbe {
        info: Option<VideoInfo>,
    }

    #[async_trait]
    impl ProbePort for MockProbe {
        async fn get_info(&self, path: &Path) -> Result<VideoInfo, DomainError> {
            self.info
                .clone()
                .ok_or_else(|| DomainError::ProbeFail(path.display().to_string()))
        }
    }

    fn video_info() -> VideoInfo {
        VideoInfo {
            path: "/videos/game.mp4".into(),
            width: 1280,
            height: 720,
            fps: 30.0,
            frame_count: 300,
            duration: 10.0,
        }
    }

    fn interactor(trim: Arc<MockTrim>, info: Option<VideoInfo>, options: ExportOptions) -> ExportInteractor {
        ExportInteractor::new(trim, Arc::new(MockProbe { info }), options)
    }

    fn request(base: &Path, custom_name: Option<&str>, start: FrameNumber, end: FrameNumber) -> RangeExportRequest {
        let mut snapshot = std::collections::BTreeMap::new();
        snapshot.insert(12, "serve".to_string());
        snapshot.insert(40, "rally".to_string());
        RangeExportRequest {
            records: DenseExportBuilder::merge(&snapshot, 100).unwrap(),
            base_folder: base.to_path_buf(),
            custom_name: custom_name.map(str::to_string),
            video_path: PathBuf::from("/videos/game.mp4"),
            start_frame: start,
            end_frame: end,
            fps: 30.0,
        }
    }

    #[tokio::test]
    async fn test_trim_failure_still_exports_csv() {
        let dir = TempDir::new().unwrap();
        let trim = MockTrim::new(false);
        let interactor = interactor(trim.clone(), Some(video_info()), ExportOptions::default());

        let report = interactor
            .export_range_with_video(request(dir.path(), Some("clip"), 10, 39))
            .await;

        assert!(report.success);
        assert!(!report.video_created);
        assert!(report.video_error.unwrap().contains("encoder crashed"));

        let csv_path = dir.path().join("clip").join("clip.csv");
        assert_eq!(report.csv_path.as_deref(), Some(csv_path.as_path()));
        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 1 + 30);
        assert!(content.contains("12,serve\n"));
        assert!(!content.contains("rally"));

        let summary = report.summary.unwrap();
        assert_eq!(summary.exported_files.video.status.as_str(), "failed");
        let summary_path = dir.path().join("clip").join("clip_summary.json");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(summary_path).unwrap()).unwrap();
        assert_eq!(json["exported_files"]["video"]["status"], "failed");
        assert_eq!(json["exported_files"]["csv"]["annotation_count"], 30);
    }

    #[tokio::test]
    async fn test_successful_export_uses_derived_names() {
        let dir = TempDir::new().unwrap();
        let trim = MockTrim::new(true);
        let interactor = interactor(trim.clone(), Some(video_info()), ExportOptions::default());

        let report = interactor.export_range_with_video(request(dir.path(), None, 1, 50)).await;
        assert!(report.success);
        assert!(report.video_created);

        let folder = dir.path().join("game_frames_1_to_50");
        assert!(folder.join("game_frames_1_to_50.mp4").exists());
        assert!(folder.join("game_frames_1_to_50.csv").exists());
        assert!(folder.join("game_frames_1_to_50_summary.json").exists());

        let calls = trim.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 1);
        assert_eq!(calls[0].2, 50);
    }

    #[tokio::test]
    async fn test_existing_folder_is_reused() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("again")).unwrap();
        let interactor = interactor(MockTrim::new(true), None, ExportOptions::default());

        let report = interactor
            .export_range_with_video(request(dir.path(), Some("again"), 5, 6))
            .await;
        assert!(report.success);
        let summary = report.summary.unwrap();
        assert_eq!(summary.original_video.resolution, None);
    }

    #[tokio::test]
    async fn test_invalid_range_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let trim = MockTrim::new(true);
        let interactor = interactor(trim.clone(), None, ExportOptions::default());

        let report = interactor
            .export_range_with_video(request(dir.path(), Some("bad"), 20, 10))
            .await;
        assert!(!report.success);
        assert!(report.error.is_some());
        assert!(!dir.path().join("bad").exists());
        assert!(trim.calls.lock().unwrap().is_empty());

        let mut zero_fps = request(dir.path(), Some("bad"), 1, 2);
        zero_fps.fps = 0.0;
        assert!(!interactor.export_range_with_video(zero_fps).await.success);
    }

    #[tokio::test]
    async fn test_range_outside_records_fails_csv() {
        let dir = TempDir::new().unwrap();
        let interactor = interactor(MockTrim::new(true), None, ExportOptions::default());

        let report = interactor
            .export_range_with_video(request(dir.path(), Some("empty"), 500, 600))
            .await;
        assert!(!report.success);
        assert!(report.summary.is_none());
        assert!(!dir.path().join("empty").join("empty_summary.json").exists());
    }

    #[tokio::test]
    async fn test_table_method_and_text_summary() {
        let dir = TempDir::new().unwrap();
        let options = ExportOptions {
            chunk_size: 7,
            method: ExportMethod::Table,
            summary_format: SummaryFormat::Text,
        };
        let interactor = interactor(MockTrim::new(true), Some(video_info()), options);

        let report = interactor
            .export_range_with_video(request(dir.path(), Some("table"), 1, 20))
            .await;
        assert!(report.success);
        assert_eq!(report.csv_metrics.unwrap().method, ExportMethod::Table);

        let text = std::fs::read_to_string(dir.path().join("table").join("table_summary.txt")).unwrap();
        assert!(text.contains("Video: created"));
    }
}
