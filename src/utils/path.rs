//! Path utilities for export folders and video discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::model::SUPPORTED_VIDEO_EXTENSIONS;

/// Characters that are rejected in file names on Windows or Linux
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Name used when cleaning leaves nothing behind
const FALLBACK_NAME: &str = "trimmed_video";

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Replace characters that are invalid in file names and strip
    /// leading/trailing spaces and dots.
    pub fn clean_name(name: &str) -> String {
        let replaced: String = name
            .chars()
            .map(|ch| if INVALID_NAME_CHARS.contains(&ch) { '_' } else { ch })
            .collect();
        let cleaned = replaced.trim_matches(|ch| ch == ' ' || ch == '.');

        if cleaned.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            cleaned.to_string()
        }
    }

    /// Lowercase extension without the dot
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Check if a path names a supported video format
    pub fn is_video_file(path: &Path) -> bool {
        Self::get_extension(path)
            .map(|ext| SUPPORTED_VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Supported video files directly inside `dir`, sorted by path.
    /// A missing or unreadable directory yields an empty list.
    pub fn video_files_in(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| Self::is_video_file(path))
            .collect();
        files.sort();
        files
    }
}
