//! CLI module for Framemark
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::*;

/// Framemark frame annotation tool
///
/// Labels individual video frames and exports the labels as CSV, optionally
/// next to a trimmed copy of the annotated range.
#[derive(Parser, Debug)]
#[command(name = "framemark")]
#[command(about = "Framemark - frame-level video annotation and CSV export")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (default: from settings)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Settings file (default: platform config directory)
    #[arg(long, global = true, env = "FRAMEMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply one annotation to a frame range
    Annotate(AnnotateArgs),
    /// Remove annotations from a frame range
    Clear(ClearArgs),
    /// Show annotation coverage
    Stats(StatsArgs),
    /// Replace a project's annotations with a CSV file
    Import(ImportArgs),
    /// Write the dense per-frame CSV
    Export(ExportArgs),
    /// Export a range as trimmed video, CSV and summary in one folder
    ExportClip(ExportClipArgs),
    /// Inspect video file information
    Inspect(InspectArgs),
    /// Save one decoded frame as PNG
    Frame(FrameArgs),
    /// List video files in a directory
    Scan(ScanArgs),
}
