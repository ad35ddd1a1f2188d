use std::path::PathBuf;
use std::process;
use std::thread::JoinHandle;

use clap::Parser;

use fxcam_core::detection::domain::detector_slot::DetectorSlot;
use fxcam_core::detection::domain::model_store::{ModelStore, ModelStoreError};
use fxcam_core::detection::infrastructure::fs_model_store::FsModelStore;
use fxcam_core::detection::infrastructure::http_model_store::HttpModelStore;
use fxcam_core::detection::infrastructure::model_loader::{self, ModelPaths};
use fxcam_core::filtering::domain::control_snapshot::{ControlSnapshot, MAX_INTENSITY};
use fxcam_core::filtering::domain::filter_kind::FilterKind;
use fxcam_core::filtering::infrastructure::filter_engine::FilterEngine;
use fxcam_core::pipeline::frame_loop::{FrameLoop, LoopConfig};
use fxcam_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use fxcam_core::pipeline::scheduler::ThreadScheduler;
use fxcam_core::shared::constants::{DEFAULT_FPS, DESCRIPTOR_FILE_NAME, WEIGHTS_FILE_NAME};
use fxcam_core::video::domain::control_state::ControlState;
use fxcam_core::video::domain::display_sink::DisplaySink;
use fxcam_core::video::domain::frame_source::FrameSource;
use fxcam_core::video::infrastructure::image_file_sink::ImageFileSink;
use fxcam_core::video::infrastructure::image_sequence_source::ImageSequenceSource;
use fxcam_core::video::infrastructure::json_control_state::JsonControlState;
use fxcam_core::video::infrastructure::null_sink::NullSink;
use fxcam_core::video::infrastructure::stalled_source::StalledSource;
use fxcam_core::video::infrastructure::static_control_state::StaticControlState;

/// Live frame filters (gray, noisy, colorize, faceblur_dnn, cartoon,
/// posterize) over a stream of image frames.
#[derive(Parser)]
#[command(name = "fxcam")]
struct Cli {
    /// Directory of frames, played back in file-name order.
    frames: PathBuf,

    /// Directory holding the face model files (default: user cache dir).
    #[arg(long, conflicts_with = "model_url")]
    model_dir: Option<PathBuf>,

    /// Base URL to download the face model files from.
    #[arg(long)]
    model_url: Option<String>,

    /// Network descriptor file name within the model store.
    #[arg(long, default_value = DESCRIPTOR_FILE_NAME)]
    descriptor: String,

    /// Network weights file name within the model store.
    #[arg(long, default_value = WEIGHTS_FILE_NAME)]
    weights: String,

    /// Target frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Initial filter: none, gray, noisy, colorize, faceblur_dnn, cartoon, posterize.
    #[arg(long, default_value = "none")]
    filter: String,

    /// Noise intensity (0-100) for the noisy filter.
    #[arg(long, default_value = "50")]
    intensity: i64,

    /// JSON control file ({"filter": "...", "intensity": N}) re-read on change.
    #[arg(long)]
    control_file: Option<PathBuf>,

    /// Preview image overwritten with every presented frame.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Stop after presenting this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Restart from the first frame when the directory is exhausted.
    #[arg(long = "loop")]
    looping: bool,

    /// Do not draw the filter name on frames.
    #[arg(long)]
    no_label: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = DetectorSlot::new();
    let paths = ModelPaths {
        descriptor: cli.descriptor.clone(),
        weights: cli.weights.clone(),
    };
    // Never joined: the loop polls the slot instead of waiting.
    let _loader = start_model_load(&detector, open_model_store(&cli), paths);

    let initial = ControlSnapshot::new(FilterKind::from_name(&cli.filter), cli.intensity);
    log::info!(
        "Starting with filter '{}' (intensity {})",
        initial.filter,
        initial.intensity
    );

    let mut frame_loop = FrameLoop::new(
        open_source(&cli),
        Box::new(FilterEngine::new(detector)),
        open_controls(&cli, initial),
        open_sink(&cli),
        Box::new(ThreadScheduler::default()),
        Box::new(StdoutPipelineLogger::default()),
        LoopConfig {
            fps: cli.fps,
            show_label: !cli.no_label,
            max_frames: cli.max_frames,
            ..LoopConfig::default()
        },
    );
    let stats = frame_loop.run();

    if let Some(preview) = &cli.preview {
        log::info!(
            "{} frames presented to {}",
            stats.presented,
            preview.display()
        );
    }
    Ok(())
}

/// A source that cannot be opened stalls the loop rather than ending the
/// program, like a camera that never delivers.
fn open_source(cli: &Cli) -> Box<dyn FrameSource> {
    match ImageSequenceSource::open(&cli.frames, cli.looping) {
        Ok(source) => Box::new(source),
        Err(e) => {
            log::error!("Frame source unavailable: {e}");
            Box::new(StalledSource)
        }
    }
}

/// Loads the face detector in the background. A store that could not be
/// opened fails the detector instead of the program, so face blur passes
/// frames through.
fn start_model_load(
    detector: &DetectorSlot,
    store: Result<Box<dyn ModelStore>, ModelStoreError>,
    paths: ModelPaths,
) -> Option<JoinHandle<()>> {
    model_loader::spawn_loader(detector, move || {
        let store = store?;
        model_loader::load_detector(store.as_ref(), &paths)
    })
}

fn open_model_store(cli: &Cli) -> Result<Box<dyn ModelStore>, ModelStoreError> {
    if let Some(url) = &cli.model_url {
        return Ok(Box::new(HttpModelStore::new(url.clone())));
    }
    let store = match &cli.model_dir {
        Some(dir) => FsModelStore::new(dir),
        None => FsModelStore::in_cache_dir()?,
    };
    log::info!("Model directory: {}", store.root().display());
    Ok(Box::new(store))
}

fn open_controls(cli: &Cli, initial: ControlSnapshot) -> Box<dyn ControlState> {
    match &cli.control_file {
        Some(path) => {
            log::info!("Watching control file {}", path.display());
            Box::new(JsonControlState::new(path, initial))
        }
        None => Box::new(StaticControlState(initial)),
    }
}

fn open_sink(cli: &Cli) -> Box<dyn DisplaySink> {
    match &cli.preview {
        Some(path) => Box::new(ImageFileSink::new(path)),
        None => Box::new(NullSink::new()),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.fps == 0 {
        return Err("FPS must be at least 1".into());
    }
    if !(0..=MAX_INTENSITY as i64).contains(&cli.intensity) {
        return Err(format!(
            "Intensity must be between 0 and {MAX_INTENSITY}, got {}",
            cli.intensity
        )
        .into());
    }
    let known = FilterKind::ALL.iter().any(|k| k.name() == cli.filter.trim());
    if !known {
        let names: Vec<&str> = FilterKind::ALL.iter().map(|k| k.name()).collect();
        return Err(format!(
            "Filter must be one of: {}, got '{}'",
            names.join(", "),
            cli.filter
        )
        .into());
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    Ok(())
}
