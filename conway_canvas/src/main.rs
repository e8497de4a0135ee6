// main.rs - Conway's Game of Life canvas window
// The grid is sized from the canvas and reseeded whenever the canvas changes size

use conway::{Config, GridEvolver, SurfaceSize};
use eframe::egui;
use egui::Color32;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod surface;   // egui painter as a drawing surface
mod ui;        // eframe::App impl

pub struct CanvasApp {
    evolver: GridEvolver,
    runtime: tokio::runtime::Runtime,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub pause_on_cycle: bool,
    canvas_size: Option<egui::Vec2>,
}

impl CanvasApp {
    fn new(config: &Config, runtime: tokio::runtime::Runtime) -> Self {
        // Until the first frame reports the real canvas, size the grid for the whole window
        let initial = SurfaceSize::new(config.window.width, config.window.height);

        Self {
            evolver: GridEvolver::new(initial, config.evolver_settings()),
            runtime,
            is_running: true,
            last_update: Instant::now(),
            update_interval: config.tick_interval(),
            live_color: surface::to_color32(config.style.live_color),
            dead_color: surface::to_color32(config.style.dead_color),
            selected_pattern: 0,
            pause_on_cycle: config.cycle.pause_on_cycle,
            canvas_size: None,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let app = CanvasApp::new(&config, runtime);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}
