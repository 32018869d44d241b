//! Dense, gap-filled export sequences built from sparse annotations

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Builds ascending per-frame record sequences with no gaps
pub struct DenseExportBuilder;

impl DenseExportBuilder {
    /// Records for frames `1..=total_frames`, all unannotated
    pub fn build_template(total_frames: i64) -> Result<Vec<ExportRecord>, DomainError> {
        if total_frames < 0 {
            return Err(DomainError::InvalidRange(format!(
                "total frame count must not be negative, got {}",
                total_frames
            )));
        }
        Ok((1..=total_frames).map(ExportRecord::unannotated).collect())
    }

    /// Template for `total_frames` overlaid with a sparse snapshot.
    ///
    /// Snapshot frames outside `[1, total_frames]` are ignored.
    pub fn merge<'a, I>(snapshot: I, total_frames: i64) -> Result<Vec<ExportRecord>, DomainError>
    where
        I: IntoIterator<Item = (&'a FrameNumber, &'a String)>,
    {
        let mut records = Self::build_template(total_frames)?;
        let mut ignored = 0usize;

        for (&frame, value) in snapshot {
            if frame >= 1 && frame <= total_frames {
                // Template index is frame - 1 by construction
                records[(frame - 1) as usize].annotation = value.clone();
            } else {
                ignored += 1;
            }
        }

        if ignored > 0 {
            debug!(ignored, total_frames, "Ignored annotations outside the video bound");
        }
        Ok(records)
    }

    /// Records whose frame number falls in `[start_frame, end_frame]`.
    ///
    /// Filters rather than indexes, so irregular input is handled.
    pub fn slice(records: &[ExportRecord], start_frame: FrameNumber, end_frame: FrameNumber) -> Vec<ExportRecord> {
        records
            .iter()
            .filter(|record| record.frame_number >= start_frame && record.frame_number <= end_frame)
            .cloned()
            .collect()
    }
}

/// Check that records are non-empty, 1-based and free of duplicate frames
pub fn validate_records(records: &[ExportRecord]) -> Result<(), DomainError> {
    if records.is_empty() {
        return Err(DomainError::BadArgs("no records to export".to_string()));
    }

    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.frame_number < 1 {
            return Err(DomainError::InvalidRange(format!(
                "invalid frame number {}",
                record.frame_number
            )));
        }
        if !seen.insert(record.frame_number) {
            return Err(DomainError::InvalidFormat(format!(
                "duplicate frame number {}",
                record.frame_number
            )));
        }
    }
    Ok(())
}

/// Coverage of a record sequence: every row counts as a frame
pub fn record_statistics(records: &[ExportRecord]) -> AnnotationStatistics {
    let annotated = records.iter().filter(|record| record.is_annotated()).count();
    AnnotationStatistics::new(records.len() as i64, annotated as i64)
}

/// Filter by optional frame bounds and optional substring (case-sensitive)
pub fn filter_records(
    records: &[ExportRecord],
    min_frame: Option<FrameNumber>,
    max_frame: Option<FrameNumber>,
    contains: Option<&str>,
) -> Vec<ExportRecord> {
    records
        .iter()
        .filter(|record| min_frame.map_or(true, |min| record.frame_number >= min))
        .filter(|record| max_frame.map_or(true, |max| record.frame_number <= max))
        .filter(|record| contains.map_or(true, |needle| record.annotation.contains(needle)))
        .cloned()
        .collect()
}

/// Sparse map of the annotated records
pub fn records_to_annotations(records: &[ExportRecord]) -> BTreeMap<FrameNumber, String> {
    records
        .iter()
        .filter(|record| record.is_annotated())
        .map(|record| (record.frame_number, record.annotation.clone()))
        .collect()
}
