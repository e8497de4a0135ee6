// config.rs - Loading config.toml

use crate::error::{Error, Result};
use crate::evolver::EvolverSettings;
use crate::render::{Color, RenderStyle};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const CONFIG_FILE: &str = "config.toml";

/// Smallest accepted cell size, in pixels.
pub const MIN_CELL_PITCH: f32 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub grid: GridConfig,
    pub timing: TimingConfig,
    pub style: StyleConfig,
    pub cycle: CycleConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 950.0,
            title: "Conway's Game of Life".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_pitch: f32,
    pub initial_density: f64,
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_pitch: 12.0,
            initial_density: 0.5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_interval_ms: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub live_color: Color,
    pub dead_color: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            live_color: Color::rgb(0, 200, 0),
            dead_color: Color::gray(40),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub history_len: usize,
    pub pause_on_cycle: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            history_len: 10,
            pause_on_cycle: false,
        }
    }
}

impl Config {
    /// Looks next to the executable first, then in the working directory.
    /// Falls back to defaults when neither has a config file.
    pub fn load() -> Result<Self> {
        let exe_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)));

        for path in exe_path.into_iter().chain([PathBuf::from(CONFIG_FILE)]) {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        info!("no {CONFIG_FILE} found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let pitch = self.grid.cell_pitch;
        if !pitch.is_finite() || pitch < MIN_CELL_PITCH {
            return Err(Error::invalid(
                "grid.cell_pitch",
                format!("must be at least {MIN_CELL_PITCH}, got {pitch}"),
            ));
        }
        let density = self.grid.initial_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::invalid(
                "grid.initial_density",
                format!("must be within 0..=1, got {density}"),
            ));
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(Error::invalid("timing.tick_interval_ms", "must be at least 1"));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(Error::invalid("window", "width and height must be positive"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timing.tick_interval_ms)
    }

    pub fn evolver_settings(&self) -> EvolverSettings {
        EvolverSettings {
            cell_pitch: self.grid.cell_pitch,
            initial_density: self.grid.initial_density,
            seed: self.grid.seed,
            history_len: self.cycle.history_len,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            pitch: self.grid.cell_pitch,
            live_color: self.style.live_color,
        }
    }
}
