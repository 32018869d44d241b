// Unit tests for the annotation store

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::store::AnnotationStore;

    #[test]
    fn test_set_rejects_invalid_frames() {
        let mut store = AnnotationStore::new();
        assert!(!store.set(0, "x"));
        assert!(!store.set(-3, "x"));
        assert!(store.is_empty());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_set_trims_and_stores() {
        let mut store = AnnotationStore::new();
        assert!(store.set(5, "  jump "));
        assert_eq!(store.get(5), Some("jump"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut once = AnnotationStore::new();
        once.set(2, " walk");

        let mut twice = AnnotationStore::new();
        twice.set(2, " walk");
        twice.set(2, " walk");

        assert_eq!(once.all(), twice.all());
    }

    #[test]
    fn test_clearing_values_delete_the_key() {
        for clearing in ["", "0", "  0  ", "   "] {
            let mut store = AnnotationStore::new();
            store.set(4, "label");
            assert!(store.set(4, clearing));
            assert_eq!(store.get(4), None, "value {:?} should clear", clearing);
        }

        let mut store = AnnotationStore::new();
        store.set(4, "label");
        assert!(store.set(4, None));
        assert_eq!(store.get(4), None);
    }

    #[test]
    fn test_clearing_unset_frame_still_succeeds() {
        let mut store = AnnotationStore::new();
        assert!(store.set(9, "0"));
        assert!(store.is_empty());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_remove() {
        let mut store = AnnotationStore::new();
        store.set(1, "a");
        assert!(store.remove(1));
        assert!(!store.remove(1));
    }

    #[test]
    fn test_all_returns_a_copy() {
        let mut store = AnnotationStore::new();
        store.set(1, "a");
        let mut snapshot = store.all();
        snapshot.insert(2, "b".to_string());
        snapshot.remove(&1);
        assert_eq!(store.get(1), Some("a"));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_statistics_use_highest_annotated_frame() {
        let mut store = AnnotationStore::new();
        assert_eq!(store.statistics(), AnnotationStatistics::new(0, 0));

        store.set(2, "a");
        store.set(8, "b");
        let stats = store.statistics();
        assert_eq!(stats.total_frames, 8);
        assert_eq!(stats.annotated_frames, 2);
        assert!((stats.annotation_rate - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_range_queries() {
        let mut store = AnnotationStore::new();
        for (frame, text) in [(1, "a"), (3, "b"), (6, "c")] {
            store.set(frame, text);
        }
        assert_eq!(store.annotated_frames(), vec![1, 3, 6]);
        assert_eq!(store.range(2, 6).len(), 2);
        assert!(store.range(6, 2).is_empty());
        assert!(store.has(3));
        assert!(!store.has(2));

        let picked = store.annotations_for_frames(&[1, 2, 6]);
        assert_eq!(picked.keys().copied().collect::<Vec<_>>(), vec![1, 6]);
    }

    #[test]
    fn test_to_records_is_dense() {
        let mut store = AnnotationStore::new();
        assert!(store.to_records().is_empty());

        store.set(2, "x");
        store.set(4, "y");
        let records = store.to_records();
        assert_eq!(
            records,
            vec![
                ExportRecord::unannotated(1),
                ExportRecord::new(2, "x"),
                ExportRecord::unannotated(3),
                ExportRecord::new(4, "y"),
            ]
        );
    }

    #[test]
    fn test_import_records_replaces_and_skips_bad_rows() {
        let mut store = AnnotationStore::new();
        store.set(100, "stale");

        let rows = vec![
            Row::new().with("Frame#", "1").with("Annotation", "run"),
            Row::new().with("Frame#", " 2 ").with("Annotation", "0"),
            Row::new().with("Frame#", "abc").with("Annotation", "bad"),
            Row::new().with("Frame#", "-1").with("Annotation", "neg"),
            Row::new().with("Annotation", "orphan"),
            Row::new().with("Frame#", "5").with("Annotation", " sit "),
        ];
        assert!(store.import_records(rows));

        assert_eq!(store.annotated_frames(), vec![1, 5]);
        assert_eq!(store.get(5), Some("sit"));
        assert_eq!(store.get(100), None);
    }

    #[test]
    fn test_import_records_accepts_export_records() {
        let mut store = AnnotationStore::new();
        store.set(3, "a");
        let records = store.to_records();

        let mut copy = AnnotationStore::new();
        copy.import_records(records);
        assert_eq!(copy.all(), store.all());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut store = AnnotationStore::new();
        store.set(1, "a");
        assert!(store.has_unsaved_changes());

        store.mark_saved();
        store.set(1, "a");
        assert!(!store.has_unsaved_changes());

        store.clear();
        assert!(store.has_unsaved_changes());
        assert!(store.is_empty());
    }
}
