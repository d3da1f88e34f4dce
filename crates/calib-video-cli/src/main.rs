//! Interactive camera calibration from a chessboard video.
//!
//! Pipeline: select frames -> collect corner detections -> solve intrinsics
//! -> write the text report -> play the video back undistorted (optionally
//! persisting the corrected stream).

use std::path::PathBuf;
use std::process::ExitCode;

use calib_video::{
    calibrate, select_all_frames, select_frames_interactively, CalibrationSamples,
    CorrectedVideoWriter, HighguiWindow, PatternDetector, PipelineError, SolveOptions,
    UndistortionPlayer, VideoFileSource,
};
use calib_video_core::{
    CalibConfig, CalibrationReport, ConfigError, PatternSize, ReportError, SelectionMode,
};
use clap::Parser;
use log::info;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

const SELECT_WINDOW: &str = "Camera Calibration";
const PLAYBACK_WINDOW: &str = "Geometric Distortion Correction";

#[derive(Debug, Parser)]
#[command(
    name = "calib-video",
    version,
    about = "Camera calibration from a chessboard video"
)]
struct Args {
    /// Input chessboard video. Required unless --config provides one.
    video: Option<PathBuf>,

    /// JSON run configuration; the flags below override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Inner-corner grid of the target, e.g. 10x7.
    #[arg(long)]
    pattern: Option<PatternSize>,

    /// Physical size of one board cell.
    #[arg(long)]
    cell_size: Option<f32>,

    /// Where to write the text report.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Persist the corrected video here; preview-only when absent.
    #[arg(long, value_name = "PATH")]
    save_video: Option<PathBuf>,

    /// Accept every frame instead of interactive selection.
    #[arg(long)]
    select_all: bool,

    /// Inter-frame key-poll budget in milliseconds.
    #[arg(long)]
    wait_ms: Option<i32>,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no input video: pass one as an argument or through --config")]
    MissingVideo,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json_logs);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(json: bool) {
    // Ignore errors if a logger/subscriber was already installed.
    let _ = LogTracer::init();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

fn resolve_config(args: &Args) -> Result<CalibConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => CalibConfig::load_json(path)?,
        None => CalibConfig::new(args.video.clone().ok_or(CliError::MissingVideo)?),
    };
    if let Some(video) = &args.video {
        cfg.video_path = video.clone();
    }
    if let Some(pattern) = args.pattern {
        cfg.pattern = pattern;
    }
    if let Some(cell_size) = args.cell_size {
        cfg.cell_size = cell_size;
    }
    if let Some(report) = &args.report {
        cfg.report_path = report.clone();
    }
    if let Some(save_video) = &args.save_video {
        cfg.corrected_video_path = Some(save_video.clone());
    }
    if args.select_all {
        cfg.selection = SelectionMode::All;
    }
    if let Some(wait_ms) = args.wait_ms {
        cfg.wait_ms = wait_ms;
    }
    Ok(cfg)
}

fn run(args: &Args) -> Result<(), CliError> {
    let cfg = resolve_config(args)?;
    let detector = PatternDetector::new(cfg.pattern);

    let mut source = VideoFileSource::open(&cfg.video_path)?;
    let fps = source.fps()?;
    let selected = match cfg.selection {
        SelectionMode::All => select_all_frames(&mut source)?,
        SelectionMode::Interactive => {
            let mut window = HighguiWindow::new(SELECT_WINDOW)?;
            select_frames_interactively(&mut source, &mut window, &detector, cfg.wait_ms)?
        }
    };
    drop(source);

    let image_count = selected.len();
    let mut samples = CalibrationSamples::new(cfg.pattern, cfg.cell_size);
    samples.observe_all(&selected)?;
    let points = samples.into_point_lists()?;
    let image_size = points.image_size;

    let outcome = calibrate(&points, &SolveOptions::default())?;
    info!(
        "calibrated from {} frames, rms = {:.4} px",
        image_count, outcome.rms
    );

    let report = CalibrationReport::new(&outcome, image_count);
    report.write(&cfg.report_path)?;
    info!("calibration report written to {}", cfg.report_path.display());

    let mut source = VideoFileSource::open(&cfg.video_path)?;
    let mut writer = match &cfg.corrected_video_path {
        Some(path) => Some(CorrectedVideoWriter::create(
            path,
            fps.unwrap_or(30.0),
            image_size,
        )?),
        None => None,
    };
    let mut window = HighguiWindow::new(PLAYBACK_WINDOW)?;
    let mut player = UndistortionPlayer::new(&outcome.intrinsics, cfg.wait_ms)?;
    player.play(&mut source, &mut window, writer.as_mut())?;
    if let Some(writer) = &writer {
        info!("corrected video written to {}", writer.path().display());
    }
    Ok(())
}
