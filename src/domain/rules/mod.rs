// Domain rules - Business logic and policies

use std::path::Path;

use crate::domain::model::*;
use crate::utils::path::PathUtils;

/// Rules deciding what counts as an annotation
pub struct AnnotationRules;

impl AnnotationRules {
    /// Normalize raw annotation input.
    ///
    /// Missing input is treated as the empty string and surrounding whitespace
    /// is trimmed. Returns `None` when the result means "no annotation"
    /// (`""` or `"0"`), otherwise the value to store.
    pub fn normalize(text: Option<&str>) -> Option<String> {
        let trimmed = text.unwrap_or("").trim();
        if Self::is_no_annotation(trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Whether an already-trimmed value is equivalent to "no annotation"
    pub fn is_no_annotation(value: &str) -> bool {
        value.is_empty() || value == DEFAULT_ANNOTATION
    }
}

/// File names shared by the artifacts of one range export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    base_name: String,
}

impl OutputNaming {
    /// Use the custom name when given, else `{video_stem}_frames_{start}_to_{end}`
    pub fn derive(custom_name: Option<&str>, video_path: &Path, range: &ExportRange) -> Self {
        let custom = custom_name.map(str::trim).filter(|name| !name.is_empty());
        let raw = match custom {
            Some(name) => name.to_string(),
            None => {
                let stem = video_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| "video".to_string());
                format!(
                    "{}_frames_{}_to_{}",
                    stem, range.start_frame, range.end_frame
                )
            }
        };

        Self {
            base_name: PathUtils::clean_name(&raw),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Destination folder name
    pub fn folder_name(&self) -> &str {
        &self.base_name
    }

    pub fn video_file(&self) -> String {
        format!("{}.mp4", self.base_name)
    }

    pub fn csv_file(&self) -> String {
        format!("{}.csv", self.base_name)
    }

    pub fn summary_file(&self, format: SummaryFormat) -> String {
        format!("{}_summary.{}", self.base_name, format.extension())
    }
}
