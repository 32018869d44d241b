//! Common utilities and helpers

pub mod path;

/// Formatting helpers for reports
pub struct Utils;

impl Utils {
    /// Format a duration in seconds as HH:MM:SS (fraction truncated)
    pub fn format_duration(seconds: f64) -> String {
        let total_seconds = if seconds.is_finite() && seconds > 0.0 {
            seconds as u64
        } else {
            0
        };
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }

    /// Format file size for display
    pub fn format_file_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        if size == 0 {
            return "0 B".to_string();
        }

        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
