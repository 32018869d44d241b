// Domain use cases - Bulk edits over the annotation store

use tracing::{debug, warn};

use crate::domain::model::FrameNumber;
use crate::domain::store::AnnotationStore;

/// Applies one annotation value to a contiguous frame range
pub struct RangeAnnotator;

impl RangeAnnotator {
    /// Write `text` to every frame in `[start_frame, end_frame]`, ascending.
    ///
    /// Best-effort: a rejected frame is skipped and the loop continues; there
    /// is no rollback. Returns the number of frames the store accepted. A
    /// reversed range writes nothing.
    pub fn apply<'a>(
        store: &mut AnnotationStore,
        start_frame: FrameNumber,
        end_frame: FrameNumber,
        text: impl Into<Option<&'a str>>,
    ) -> usize {
        let text = text.into();
        let mut written = 0;
        let mut rejected = 0;

        for frame in start_frame..=end_frame {
            if store.set(frame, text) {
                written += 1;
            } else {
                rejected += 1;
            }
        }

        if rejected > 0 {
            warn!(start_frame, end_frame, rejected, "Skipped invalid frames while applying range");
        }
        debug!(start_frame, end_frame, written, "Applied annotation to range");
        written
    }

    /// Clear every frame in `[start_frame, end_frame]`
    pub fn clear(store: &mut AnnotationStore, start_frame: FrameNumber, end_frame: FrameNumber) -> usize {
        Self::apply(store, start_frame, end_frame, None)
    }
}
