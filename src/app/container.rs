use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{FfmpegFrameAdapter, FfmpegTrimAdapter, FfprobeAdapter, JsonProjectAdapter};
use crate::app::export_interactor::{ExportInteractor, ExportOptions};
use crate::domain::model::Settings;
use crate::ports::{FramePort, ProbePort, TrimPort};

pub trait AppContainer: Send + Sync {
    fn export_interactor(&self) -> Arc<ExportInteractor>;
    fn probe_port(&self) -> Arc<dyn ProbePort>;
    fn trim_port(&self) -> Arc<dyn TrimPort>;
    fn frame_port(&self) -> Arc<dyn FramePort>;
    fn project_adapter(&self) -> Arc<JsonProjectAdapter>;
}

/// Wires the ffmpeg-backed adapters from the active settings
pub struct DefaultAppContainer {
    export_interactor: Arc<ExportInteractor>,
    probe_port: Arc<dyn ProbePort>,
    trim_port: Arc<dyn TrimPort>,
    frame_port: Arc<dyn FramePort>,
    project_adapter: Arc<JsonProjectAdapter>,
}

impl DefaultAppContainer {
    pub fn new(settings: &Settings) -> Self {
        let probe = FfprobeAdapter::new(&settings.ffprobe_path);
        let probe_port: Arc<dyn ProbePort> = Arc::new(probe.clone());
        let trim_port: Arc<dyn TrimPort> = Arc::new(FfmpegTrimAdapter::new(
            &settings.ffmpeg_path,
            Duration::from_secs(settings.trim_timeout_secs),
        ));
        let frame_port: Arc<dyn FramePort> = Arc::new(FfmpegFrameAdapter::new(&settings.ffmpeg_path, probe));

        let export_interactor = Arc::new(ExportInteractor::new(
            Arc::clone(&trim_port),
            Arc::clone(&probe_port),
            ExportOptions::from(settings),
        ));

        Self {
            export_interactor,
            probe_port,
            trim_port,
            frame_port,
            project_adapter: Arc::new(JsonProjectAdapter::new()),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }

    fn probe_port(&self) -> Arc<dyn ProbePort> {
        Arc::clone(&self.probe_port)
    }

    fn trim_port(&self) -> Arc<dyn TrimPort> {
        Arc::clone(&self.trim_port)
    }

    fn frame_port(&self) -> Arc<dyn FramePort> {
        Arc::clone(&self.frame_port)
    }

    fn project_adapter(&self) -> Arc<JsonProjectAdapter> {
        Arc::clone(&self.project_adapter)
    }
}
