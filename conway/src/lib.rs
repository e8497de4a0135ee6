//! Conway's Game of Life on a bounded (non-wrapping) grid.
//!
//! [`GridEvolver`] owns the current generation and steps it forward, a
//! [`Surface`] receives the rendered cells, and [`driver::run`] ticks the
//! evolver on a fixed period when there is no window to drive it.

pub mod config;
pub mod driver;
pub mod error;
pub mod evolver;
pub mod grid;
pub mod patterns;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};
pub use evolver::{
    Advance, EvolverSettings, GridEvolver, TickOutcome, apply_rule, next_generation,
    next_generation_cooperative, next_generation_into,
};
pub use grid::{Cell, Dimensions, Grid, count_live_neighbors};
pub use patterns::{PATTERNS, Pattern};
pub use render::{Color, RenderStyle, Surface, SurfaceSize, render};
