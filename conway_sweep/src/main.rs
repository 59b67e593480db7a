// main.rs - Conway's Game of Life with an incremental sweep cursor and phosphor trails

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use conway::{SpeedPreset, SweepEngine};
use eframe::egui;

mod app;
mod driver;
mod error;
mod input;
mod settings;
mod view;

use app::SweepApp;
use error::AppError;
use settings::AppConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpeedArg {
    Slow,
    Medium,
    Fast,
}

impl From<SpeedArg> for SpeedPreset {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => SpeedPreset::Slow,
            SpeedArg::Medium => SpeedPreset::Medium,
            SpeedArg::Fast => SpeedPreset::Fast,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "conway-sweep", version, about = "Game of Life stepped one cell at a time")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible starting grids
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the clock paused
    #[arg(long)]
    paused: bool,

    /// Initial speed preset
    #[arg(long, value_enum)]
    speed: Option<SpeedArg>,
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.engine.seed = Some(seed);
    }
    if args.paused {
        config.start_paused = true;
    }

    let mut engine = SweepEngine::from_config(&config.engine)?;
    engine.seed();
    if let Some(speed) = args.speed {
        engine.apply_preset(speed.into());
    }

    log::info!("Starting conway-sweep");
    log::info!("Grid: {}x{} ({} cells)", engine.cols(), engine.rows(), engine.total());
    log::info!("Speed: {:.2} cells/s, {:.2}s per sweep", engine.speed().rate(), engine.sweep_seconds());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("sweep-clock")
        .enable_time()
        .build()?;

    let grid = view::grid_size(config.cell_px, engine.cols(), engine.rows());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(grid.x + 32.0).max(800.0), grid.y + 200.0]),
        ..Default::default()
    };

    let app = SweepApp::new(&config, engine, runtime);
    eframe::run_native(
        "Conway Sweep",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| AppError::Ui(e.to_string()))
}
