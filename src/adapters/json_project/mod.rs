//! Annotation project file persistence
//!
//! A project file is a JSON object mapping frame numbers (as strings) to
//! annotation text. Loading is lossy: entries that do not fit are skipped.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::domain::store::AnnotationStore;
use crate::error::{FramemarkError, FramemarkResult};

/// Reads and writes annotation project files
#[derive(Debug, Clone, Default)]
pub struct JsonProjectAdapter;

impl JsonProjectAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Replace the store contents with the file's annotations.
    ///
    /// Keys that are not integers and values that are not strings are
    /// skipped; values are normalized the same way interactive edits are.
    pub fn load_into(&self, store: &mut AnnotationStore, path: &Path) -> FramemarkResult<usize> {
        if !path.exists() {
            return Err(FramemarkError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let object = value.as_object().ok_or_else(|| FramemarkError::InvalidProjectFile {
            path: path.display().to_string(),
            message: "expected a JSON object of frame -> annotation".to_string(),
        })?;

        store.clear();
        let mut skipped = 0usize;
        for (key, value) in object {
            let frame = key.trim().parse::<i64>().ok();
            match (frame, value.as_str()) {
                (Some(frame), Some(text)) if store.set(frame, text) => {}
                _ => skipped += 1,
            }
        }
        store.mark_saved();

        if skipped > 0 {
            warn!(skipped, path = %path.display(), "Skipped unusable project entries");
        }
        info!(annotations = store.count(), path = %path.display(), "Loaded annotations");
        Ok(store.count())
    }

    /// Load a fresh store from `path`
    pub fn load(&self, path: &Path) -> FramemarkResult<AnnotationStore> {
        let mut store = AnnotationStore::new();
        self.load_into(&mut store, path)?;
        Ok(store)
    }

    /// Load `path` if it exists, else start empty
    pub fn load_or_default(&self, path: &Path) -> FramemarkResult<AnnotationStore> {
        if path.exists() {
            self.load(path)
        } else {
            Ok(AnnotationStore::new())
        }
    }

    /// Write the store atomically and mark it saved
    pub fn save(&self, store: &mut AnnotationStore, path: &Path) -> FramemarkResult<()> {
        // Integer keys serialize as strings in numeric order
        let content = serde_json::to_string_pretty(&store.all())?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.persist(path).map_err(|e| FramemarkError::OutputError {
            message: format!("Failed to replace {}: {}", path.display(), e.error),
        })?;

        store.mark_saved();
        info!(annotations = store.count(), path = %path.display(), "Saved annotations");
        Ok(())
    }
}
