//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the annotate command
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Annotation project file (created when missing)
    #[arg(short, long)]
    pub project: PathBuf,

    /// First frame (1-based)
    #[arg(short, long)]
    pub start: i64,

    /// Last frame, inclusive (default: the start frame)
    #[arg(short, long)]
    pub end: Option<i64>,

    /// Annotation text; "" or "0" clears
    #[arg(short, long)]
    pub text: String,

    /// Video frame count; the range must end within it
    #[arg(long)]
    pub total_frames: Option<i64>,
}

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Annotation project file
    #[arg(short, long)]
    pub project: PathBuf,

    /// First frame (1-based)
    #[arg(short, long)]
    pub start: i64,

    /// Last frame, inclusive (default: the start frame)
    #[arg(short, long)]
    pub end: Option<i64>,
}

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Annotation project file
    #[arg(short, long)]
    pub project: PathBuf,

    /// Video frame count; without it the highest annotated frame is used
    #[arg(long)]
    pub total_frames: Option<i64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file with Frame# and Annotation columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Annotation project file to replace
    #[arg(short, long)]
    pub project: PathBuf,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Annotation project file
    #[arg(short, long)]
    pub project: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Video frame count; without it the highest annotated frame is used
    #[arg(long)]
    pub total_frames: Option<i64>,

    /// First exported frame (default: 1)
    #[arg(short, long)]
    pub start: Option<i64>,

    /// Last exported frame (default: the total frame count)
    #[arg(short, long)]
    pub end: Option<i64>,

    /// CSV writer: streaming or table
    #[arg(long)]
    pub method: Option<String>,

    /// Rows written between yield points
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Print export metrics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the export-clip command
#[derive(Args, Debug)]
pub struct ExportClipArgs {
    /// Annotation project file
    #[arg(short, long)]
    pub project: PathBuf,

    /// Source video file
    #[arg(short, long)]
    pub video: PathBuf,

    /// First frame of the range
    #[arg(short, long)]
    pub start: i64,

    /// Last frame of the range
    #[arg(short, long)]
    pub end: i64,

    /// Frame rate (default: probed from the video)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Video frame count (default: probed from the video)
    #[arg(long)]
    pub total_frames: Option<i64>,

    /// Folder that receives the export folder (default: last export directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Base name for the folder and its files
    #[arg(short, long)]
    pub name: Option<String>,

    /// Summary layout: json or text
    #[arg(long)]
    pub summary_format: Option<String>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the frame command
#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// 1-based frame number
    #[arg(short, long)]
    pub frame: i64,

    /// PNG output path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to list
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
