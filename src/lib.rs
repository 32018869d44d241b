//! Framemark Library
//!
//! Frame-level video annotation: a sparse per-frame label store, dense CSV
//! export with a streaming writer, and range exports that put a trimmed
//! clip, its CSV and a summary into one folder.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{ExportMetrics, ExportRange, ExportRecord, FrameNumber, Settings, VideoInfo};
pub use domain::store::AnnotationStore;
pub use error::{FramemarkError, FramemarkResult};
