// Annotation store - sparse frame -> annotation map

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::model::*;
use crate::domain::rules::AnnotationRules;

/// In-memory sparse mapping from frame number to annotation text.
///
/// Every stored value is substantive: writes that normalize to `""` or `"0"`
/// delete the key instead. Not thread-safe; confine it to one owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: BTreeMap<FrameNumber, String>,
    dirty: bool,
}

impl AnnotationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Write or clear one frame.
    ///
    /// Returns `false` only for frame numbers below 1. A clearing write
    /// returns `true` whether or not the frame was annotated.
    pub fn set<'a>(&mut self, frame: FrameNumber, text: impl Into<Option<&'a str>>) -> bool {
        if frame < 1 {
            return false;
        }

        match AnnotationRules::normalize(text.into()) {
            Some(value) => {
                let changed = self.annotations.get(&frame) != Some(&value);
                if changed {
                    self.annotations.insert(frame, value);
                    self.dirty = true;
                }
            }
            None => {
                if self.annotations.remove(&frame).is_some() {
                    self.dirty = true;
                }
            }
        }
        true
    }

    /// Stored value for a frame; absence means unset
    pub fn get(&self, frame: FrameNumber) -> Option<&str> {
        self.annotations.get(&frame).map(String::as_str)
    }

    /// Remove a frame's annotation; true iff one existed
    pub fn remove(&mut self, frame: FrameNumber) -> bool {
        let removed = self.annotations.remove(&frame).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn has(&self, frame: FrameNumber) -> bool {
        self.annotations.contains_key(&frame)
    }

    /// Owned copy of every annotation
    pub fn all(&self) -> BTreeMap<FrameNumber, String> {
        self.annotations.clone()
    }

    /// Borrowed view used by exporters that only read
    pub fn iter(&self) -> impl Iterator<Item = (&FrameNumber, &String)> {
        self.annotations.iter()
    }

    /// Number of annotated frames
    pub fn count(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Annotated frame numbers, ascending
    pub fn annotated_frames(&self) -> Vec<FrameNumber> {
        self.annotations.keys().copied().collect()
    }

    /// Annotations for the listed frames that have one
    pub fn annotations_for_frames(&self, frames: &[FrameNumber]) -> BTreeMap<FrameNumber, String> {
        frames
            .iter()
            .filter_map(|frame| {
                self.annotations
                    .get(frame)
                    .map(|value| (*frame, value.clone()))
            })
            .collect()
    }

    /// Annotations inside `[start, end]`; empty when start > end
    pub fn range(&self, start: FrameNumber, end: FrameNumber) -> BTreeMap<FrameNumber, String> {
        if start > end {
            return BTreeMap::new();
        }
        self.annotations
            .range(start..=end)
            .map(|(frame, value)| (*frame, value.clone()))
            .collect()
    }

    /// Coverage figures.
    ///
    /// `total_frames` is the highest annotated frame, not the video length,
    /// so trailing unannotated frames are not counted.
    pub fn statistics(&self) -> AnnotationStatistics {
        let total_frames = self.annotations.keys().next_back().copied().unwrap_or(0);
        AnnotationStatistics::new(total_frames, self.annotations.len() as i64)
    }

    /// Dense records for frames `1..=max annotated frame`
    pub fn to_records(&self) -> Vec<ExportRecord> {
        let max_frame = self.annotations.keys().next_back().copied().unwrap_or(0);
        (1..=max_frame)
            .map(|frame| match self.annotations.get(&frame) {
                Some(value) => ExportRecord::new(frame, value.clone()),
                None => ExportRecord::unannotated(frame),
            })
            .collect()
    }

    /// Replace the contents with `Frame#`/`Annotation` rows.
    ///
    /// Rows without both fields, with a frame number that does not parse or
    /// is below 1, or whose annotation normalizes to "no annotation" are
    /// skipped. Always succeeds.
    pub fn import_records<I>(&mut self, rows: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        self.annotations.clear();
        self.dirty = true;

        let mut skipped = 0usize;
        for row in rows {
            let row: Row = row.into();
            let (Some(frame), Some(annotation)) = (row.get(FRAME_FIELD), row.get(ANNOTATION_FIELD))
            else {
                skipped += 1;
                continue;
            };
            match frame.trim().parse::<FrameNumber>() {
                Ok(frame) if self.set(frame, annotation) => {}
                _ => skipped += 1,
            }
        }

        debug!(annotations = self.annotations.len(), skipped, "Imported annotation records");
        true
    }

    /// Drop every annotation
    pub fn clear(&mut self) {
        if !self.annotations.is_empty() {
            self.dirty = true;
        }
        self.annotations.clear();
    }

    /// True after any effective mutation since the last save/load
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Record that the current contents are persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests;
