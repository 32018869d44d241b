// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;

    #[test]
    fn test_export_range_valid() {
        let range = ExportRange::new(3, 7).unwrap();
        assert_eq!(range.frame_count(), 5);
        assert!(range.contains(3));
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert_eq!(range.to_string(), "3-7");
    }

    #[test]
    fn test_export_range_single_frame() {
        let range = ExportRange::new(4, 4).unwrap();
        assert_eq!(range.frame_count(), 1);
    }

    #[test]
    fn test_export_range_rejects_zero_start() {
        assert!(matches!(
            ExportRange::new(0, 5),
            Err(DomainError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_export_range_rejects_reversed() {
        assert!(ExportRange::new(9, 2).is_err());
    }

    #[test]
    fn test_export_range_within_bound() {
        assert!(ExportRange::within(1, 100, 100).is_ok());
        assert!(ExportRange::within(1, 101, 100).is_err());
    }

    #[test]
    fn test_export_range_durations() {
        let range = ExportRange::new(31, 90).unwrap();
        assert!((range.duration_seconds(30.0) - 2.0).abs() < 1e-9);
        assert!((range.start_seconds(30.0) - 1.0).abs() < 1e-9);
        assert_eq!(range.duration_seconds(0.0), 0.0);
    }

    #[test]
    fn test_export_record_defaults() {
        let record = ExportRecord::unannotated(12);
        assert_eq!(record.annotation, "0");
        assert!(!record.is_annotated());
        assert!(ExportRecord::new(12, "jump").is_annotated());
    }

    #[test]
    fn test_export_method_parse() {
        assert_eq!(ExportMethod::parse("streaming").unwrap(), ExportMethod::Streaming);
        assert_eq!(ExportMethod::parse("FAST").unwrap(), ExportMethod::Streaming);
        assert_eq!(ExportMethod::parse("table").unwrap(), ExportMethod::Table);
        assert!(ExportMethod::parse("pandas").is_err());
    }

    #[test]
    fn test_summary_format_parse() {
        assert_eq!(SummaryFormat::parse("json").unwrap().extension(), "json");
        assert_eq!(SummaryFormat::parse("txt").unwrap().extension(), "txt");
        assert!(SummaryFormat::parse("xml").is_err());
    }

    #[test]
    fn test_statistics_rate() {
        let stats = AnnotationStatistics::new(10, 4);
        assert!((stats.annotation_rate - 0.4).abs() < 1e-9);

        let empty = AnnotationStatistics::new(0, 0);
        assert_eq!(empty.annotation_rate, 0.0);
    }

    fn sample_video() -> VideoInfo {
        VideoInfo {
            path: "clip.mp4".into(),
            width: 1920,
            height: 1080,
            fps: 25.0,
            frame_count: 250,
            duration: 10.0,
        }
    }

    #[test]
    fn test_video_info_helpers() {
        let info = sample_video();
        assert_eq!(info.resolution(), "1920x1080");
        assert!((info.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
        assert!((info.frame_time() - 0.04).abs() < 1e-9);
        assert!((info.timestamp_of(26) - 1.0).abs() < 1e-9);
        assert_eq!(info.timestamp_of(0), 0.0);
        assert_eq!(info.timestamp_of(251), 0.0);
        assert_eq!(info.frame_at(1.0), 26);
        assert_eq!(info.frame_at(-1.0), 1);
        assert_eq!(info.frame_at(11.0), 1);
    }

    #[test]
    fn test_settings_defaults_validate() {
        let settings = Settings::default();
        assert_eq!(settings.chunk_size, 5000);
        assert_eq!(settings.export_method, ExportMethod::Streaming);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.chunk_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_recent_files() {
        let mut settings = Settings::default();
        settings.max_recent_files = 3;
        settings.add_recent_file("a.mp4");
        settings.add_recent_file("b.mp4");
        settings.add_recent_file("c.mp4");
        settings.add_recent_file("a.mp4");
        settings.add_recent_file("d.mp4");
        settings.add_recent_file("");
        assert_eq!(settings.recent_files(), &["d.mp4", "a.mp4", "c.mp4"]);

        settings.clear_recent_files();
        assert!(settings.recent_files().is_empty());
    }

    #[test]
    fn test_row_insert_keeps_keys_unique() {
        let mut row = Row::new().with("Frame#", "1").with("Annotation", "a");
        row.insert("Frame#", "2");
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Frame#"), Some("2"));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Frame#", "Annotation"]);
    }

    #[test]
    fn test_row_projection() {
        let row = Row::new().with("Annotation", "x").with("Extra", "dropped");
        let header = vec!["Frame#".to_string(), "Annotation".to_string()];
        assert_eq!(row.project(&header).collect::<Vec<_>>(), vec!["", "x"]);
    }

    #[test]
    fn test_row_from_export_record() {
        let row = Row::from(ExportRecord::new(7, "fall"));
        assert_eq!(row.get("Frame#"), Some("7"));
        assert_eq!(row.get("Annotation"), Some("fall"));
    }

    #[test]
    fn test_export_kind_required_fields() {
        let header = vec!["Frame#".to_string()];
        assert_eq!(ExportKind::Annotation.missing_field(&header), Some("Annotation"));

        let header = vec!["Annotation".to_string(), "Frame#".to_string()];
        assert_eq!(ExportKind::Annotation.missing_field(&header), None);

        let tracking: Vec<String> = ExportKind::Tracking
            .fields()
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert_eq!(ExportKind::Tracking.missing_field(&tracking), None);
        assert_eq!(tracking.len(), 19);
    }

    fn detection(x1: f64, x2: f64) -> Detection {
        Detection {
            tracking_id: Some(4),
            class_name: "person".to_string(),
            confidence: 0.9,
            bbox: BoundingBox { x1, y1: 10.0, x2, y2: 30.0 },
        }
    }

    #[test]
    fn test_tracking_record_left_half() {
        let record = TrackingRecord::new(3, detection(10.0, 30.0), 200);
        assert_eq!(record.side, FrameSide::Left);

        let row = Row::from(&record);
        assert_eq!(row.get("Object_ID"), Some("4"));
        assert_eq!(row.get("Center_X"), Some("20"));
        assert_eq!(row.get("Left_X_Position"), Some("20"));
        assert_eq!(row.get("Left_Size"), Some("400"));
        assert_eq!(row.get("Right_X_Position"), Some("0"));
        assert_eq!(row.get("Right_Size"), Some("0"));
    }

    #[test]
    fn test_tracking_record_right_half() {
        let record = TrackingRecord::new(3, detection(100.0, 140.0), 200);
        assert_eq!(record.side, FrameSide::Right);

        let row = Row::from(record);
        assert_eq!(row.get("Left_Size"), Some("0"));
        assert_eq!(row.get("Right_X_Position"), Some("120"));
        assert_eq!(row.get("Right_Size"), Some("800"));
        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, ExportKind::Tracking.fields().to_vec());
    }

    #[test]
    fn test_settings_directories_and_reset() {
        let mut settings = Settings::default();
        settings.set_last_video_directory("/videos");
        settings.set_last_export_directory("/exports");
        assert_eq!(settings.last_video_directory(), "/videos");
        assert_eq!(settings.last_export_directory(), "/exports");

        settings.reset_to_defaults();
        assert_eq!(settings, Settings::default());
    }
}
