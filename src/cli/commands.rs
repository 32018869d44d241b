//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::app::container::AppContainer;
use crate::app::{RangeExportReport, RangeExportRequest};
use crate::cli::args::*;
use crate::cli::Commands;
use crate::config_initialization::SettingsSession;
use crate::domain::model::*;
use crate::domain::usecases::RangeAnnotator;
use crate::output::dense::{self, DenseExportBuilder};
use crate::output::reader;
use crate::output::{StreamingCsvWriter, TableCsvWriter};
use crate::utils::path::PathUtils;
use crate::utils::Utils;

/// Execute a parsed command against the wired adapters
pub async fn run(command: Commands, container: &dyn AppContainer, session: &mut SettingsSession) -> Result<()> {
    match command {
        Commands::Annotate(args) => annotate(args, container),
        Commands::Clear(args) => clear(args, container),
        Commands::Stats(args) => stats(args, container),
        Commands::Import(args) => import(args, container),
        Commands::Export(args) => export(args, container, session).await,
        Commands::ExportClip(args) => export_clip(args, container, session).await,
        Commands::Inspect(args) => inspect(args, container, session).await,
        Commands::Frame(args) => frame(args, container, session).await,
        Commands::Scan(args) => scan(args),
    }
}

/// Execute the annotate command
pub fn annotate(args: AnnotateArgs, container: &dyn AppContainer) -> Result<()> {
    let end = args.end.unwrap_or(args.start);
    let limit = checked_total(args.total_frames.unwrap_or(MAX_FRAME_NUMBER))?;
    let range = ExportRange::within(args.start, end, limit).context("Invalid frame range")?;

    let projects = container.project_adapter();
    let mut store = projects.load_or_default(&args.project)?;
    let written = RangeAnnotator::apply(&mut store, range.start_frame, range.end_frame, args.text.as_str());
    projects.save(&mut store, &args.project)?;

    info!(range = %range, written, "Annotate operation completed");
    println!(
        "Annotated frames {} ({} frames); {} annotations in project",
        range,
        written,
        store.count()
    );
    Ok(())
}

/// Execute the clear command
pub fn clear(args: ClearArgs, container: &dyn AppContainer) -> Result<()> {
    let end = args.end.unwrap_or(args.start);
    let range = ExportRange::new(args.start, end).context("Invalid frame range")?;

    let projects = container.project_adapter();
    let mut store = projects
        .load(&args.project)
        .context("Failed to open annotation project")?;
    let before = store.count();
    // Nothing past the last annotated frame needs clearing
    let last = store.annotated_frames().last().copied().unwrap_or(0);
    RangeAnnotator::clear(&mut store, range.start_frame, range.end_frame.min(last));
    projects.save(&mut store, &args.project)?;

    println!(
        "Cleared frames {}; removed {} annotations, {} remaining",
        range,
        before - store.count(),
        store.count()
    );
    Ok(())
}

/// Execute the stats command
pub fn stats(args: StatsArgs, container: &dyn AppContainer) -> Result<()> {
    let store = container
        .project_adapter()
        .load(&args.project)
        .context("Failed to open annotation project")?;

    let statistics = match args.total_frames {
        Some(total) => {
            let records = DenseExportBuilder::merge(store.iter(), checked_total(total)?)?;
            dense::record_statistics(&records)
        }
        None => store.statistics(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&statistics)
            .context("Failed to serialize statistics to JSON")?;
        println!("{}", json);
    } else {
        println!("Annotation Statistics");
        println!("=====================");
        println!("Total frames: {}", statistics.total_frames);
        println!("Annotated frames: {}", statistics.annotated_frames);
        println!("Annotation rate: {:.1}%", statistics.annotation_rate * 100.0);
    }
    Ok(())
}

/// Execute the import command
pub fn import(args: ImportArgs, container: &dyn AppContainer) -> Result<()> {
    let rows = reader::read_rows(&args.input).context("Failed to read annotation CSV")?;
    let row_count = rows.len();

    let projects = container.project_adapter();
    let mut store = projects.load_or_default(&args.project)?;
    store.import_records(rows);
    projects.save(&mut store, &args.project)?;

    info!(rows = row_count, annotations = store.count(), "Import operation completed");
    println!(
        "Imported {} annotations from {} rows into {}",
        store.count(),
        row_count,
        args.project.display()
    );
    Ok(())
}

/// Execute the export command
pub async fn export(args: ExportArgs, container: &dyn AppContainer, session: &SettingsSession) -> Result<()> {
    let store = container
        .project_adapter()
        .load(&args.project)
        .context("Failed to open annotation project")?;

    let total_frames = match args.total_frames {
        Some(total) => checked_total(total)?,
        None => store.annotated_frames().last().copied().unwrap_or(0),
    };
    let mut records = DenseExportBuilder::merge(store.iter(), total_frames)?;
    if args.start.is_some() || args.end.is_some() {
        let range = ExportRange::new(args.start.unwrap_or(1), args.end.unwrap_or(total_frames))
            .context("Invalid export range")?;
        records = DenseExportBuilder::slice(&records, range.start_frame, range.end_frame);
    }

    let settings = session.effective();
    let method = settings.export_method;
    let chunk_size = settings.chunk_size;
    let output = args.output.clone();
    info!(output = %output.display(), method = method.as_str(), rows = records.len(), "Starting CSV export");

    let metrics = tokio::task::spawn_blocking(move || match method {
        ExportMethod::Streaming => {
            let mut on_chunk = |rows: u64| info!(rows, "CSV export progress");
            StreamingCsvWriter::new(chunk_size).write(records, &output, Some(&mut on_chunk))
        }
        ExportMethod::Table => TableCsvWriter::new().write(records, &output),
    })
    .await
    .context("CSV export task failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&metrics)
            .context("Failed to serialize export metrics to JSON")?;
        println!("{}", json);
    }

    if !metrics.success {
        let message = metrics.error.unwrap_or_else(|| "unknown error".to_string());
        error!("Export failed: {}", message);
        return Err(anyhow::anyhow!("Export failed: {}", message));
    }

    if !args.json {
        println!("Exported {} rows to {}", metrics.rows_written, args.output.display());
        println!(
            "Method: {}, {:.3}s total, {:.3}s longest block, {} chunks",
            metrics.method.as_str(),
            metrics.duration_seconds,
            metrics.max_block_seconds,
            metrics.chunk_count
        );
    }
    Ok(())
}

/// Execute the export-clip command
pub async fn export_clip(
    args: ExportClipArgs,
    container: &dyn AppContainer,
    session: &mut SettingsSession,
) -> Result<()> {
    if !args.video.exists() {
        return Err(anyhow::anyhow!("Input file does not exist: {}", args.video.display()));
    }

    let store = container
        .project_adapter()
        .load(&args.project)
        .context("Failed to open annotation project")?;

    let (fps, total_frames) = match (args.fps, args.total_frames) {
        (Some(fps), Some(total)) => (fps, total),
        (fps, total) => {
            let info = container
                .probe_port()
                .get_info(&args.video)
                .await
                .context("Failed to probe video; pass --fps and --total-frames to skip probing")?;
            (fps.unwrap_or(info.fps), total.unwrap_or(info.frame_count))
        }
    };
    ExportRange::within(args.start, args.end, total_frames).context("Invalid export range")?;

    let base_folder = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => default_export_directory(session.effective()),
    };

    let request = RangeExportRequest {
        records: DenseExportBuilder::merge(store.iter(), total_frames)?,
        base_folder: base_folder.clone(),
        custom_name: args.name.clone(),
        video_path: args.video.clone(),
        start_frame: args.start,
        end_frame: args.end,
        fps,
    };

    let report = container.export_interactor().export_range_with_video(request).await;
    session.remember_video(&args.video);
    if report.output_folder.is_some() {
        session.remember_export_directory(&base_folder);
    }

    display_range_report(&report);

    if report.success {
        Ok(())
    } else {
        let message = report.error.unwrap_or_else(|| "unknown error".to_string());
        error!("Range export failed: {}", message);
        Err(anyhow::anyhow!("Range export failed: {}", message))
    }
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs, container: &dyn AppContainer, session: &mut SettingsSession) -> Result<()> {
    info!("Input: {}", args.input.display());
    if !args.input.exists() {
        return Err(anyhow::anyhow!("Input file does not exist: {}", args.input.display()));
    }

    let info = container
        .probe_port()
        .get_info(&args.input)
        .await
        .context("Failed to inspect input file")?;
    session.remember_video(&args.input);

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .context("Failed to serialize video info to JSON")?;
        println!("{}", json);
    } else {
        let file_size = std::fs::metadata(&args.input).map(|m| m.len()).unwrap_or(0);
        display_video_info(&info, file_size);
    }
    Ok(())
}

/// Execute the frame command
pub async fn frame(args: FrameArgs, container: &dyn AppContainer, session: &mut SettingsSession) -> Result<()> {
    if !args.input.exists() {
        return Err(anyhow::anyhow!("Input file does not exist: {}", args.input.display()));
    }

    let frame = container
        .frame_port()
        .get_frame(&args.input, args.frame)
        .await
        .with_context(|| format!("Failed to decode frame {}", args.frame))?;
    session.remember_video(&args.input);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&args.output, &frame.png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Saved frame {} to {} ({})",
        frame.frame_number,
        args.output.display(),
        Utils::format_file_size(frame.png.len() as u64)
    );
    Ok(())
}

/// Execute the scan command
pub fn scan(args: ScanArgs) -> Result<()> {
    if !args.dir.is_dir() {
        warn!("Not a directory: {}", args.dir.display());
    }

    let files = PathUtils::video_files_in(&args.dir);
    if args.json {
        let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
        let json = serde_json::to_string_pretty(&names)
            .context("Failed to serialize file list to JSON")?;
        println!("{}", json);
    } else {
        for file in &files {
            println!("{}", file.display());
        }
        println!("{} video files", files.len());
    }
    Ok(())
}

/// Reject frame counts no video has before allocating for them
fn checked_total(total_frames: i64) -> Result<i64> {
    if total_frames > MAX_FRAME_NUMBER {
        return Err(anyhow::anyhow!(
            "Frame count {} exceeds the supported maximum of {}",
            total_frames,
            MAX_FRAME_NUMBER
        ));
    }
    Ok(total_frames)
}

fn default_export_directory(settings: &Settings) -> PathBuf {
    let last = settings.last_export_directory();
    if !last.is_empty() && Path::new(last).is_dir() {
        PathBuf::from(last)
    } else {
        PathBuf::from(".")
    }
}

/// Display video information in human-readable format
fn display_video_info(info: &VideoInfo, file_size: u64) {
    println!("Video Information");
    println!("=================");
    println!("File: {}", info.path.display());
    println!("File Size: {}", Utils::format_file_size(file_size));
    println!("Resolution: {}", info.resolution());
    println!("Frame Rate: {:.2} fps", info.fps);
    println!("Frames: {}", info.frame_count);
    println!("Duration: {} ({:.3}s)", Utils::format_duration(info.duration), info.duration);
}

/// Display a range export report in human-readable format
fn display_range_report(report: &RangeExportReport) {
    if let Some(folder) = &report.output_folder {
        println!("Export folder: {}", folder.display());
    }
    match (&report.video_path, report.video_created) {
        (Some(path), true) => println!("Video: {}", path.display()),
        _ => println!(
            "Video: failed ({})",
            report.video_error.as_deref().unwrap_or("not attempted")
        ),
    }
    if let (Some(path), Some(metrics)) = (&report.csv_path, &report.csv_metrics) {
        if metrics.success {
            println!("CSV: {} ({} rows)", path.display(), metrics.rows_written);
        } else {
            println!("CSV: failed");
        }
    }
    if let Some(path) = &report.summary_path {
        println!("Summary: {}", path.display());
    }
}
