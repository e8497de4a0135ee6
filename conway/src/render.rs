// render.rs - Projects a grid onto a drawing surface

use crate::grid::{Dimensions, Grid};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Pixel size of the area the grid is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width_px: f32,
    pub height_px: f32,
}

impl SurfaceSize {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self { width_px, height_px }
    }

    pub fn dimensions(&self, pitch: f32) -> Dimensions {
        Dimensions::from_surface(self.width_px, self.height_px, pitch)
    }
}

/// Something cells can be painted onto.
pub trait Surface {
    /// A torn-down surface reports false and is never drawn to.
    fn is_available(&self) -> bool {
        true
    }

    fn clear(&mut self);

    fn fill_cell(&mut self, x: f32, y: f32, size: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub pitch: f32,
    pub live_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            pitch: 12.0,
            live_color: Color::rgb(0, 200, 0),
        }
    }
}

/// Clears the surface and fills one square per alive cell.
///
/// Returns false without touching the surface when it is unavailable.
pub fn render<S: Surface + ?Sized>(grid: &Grid, surface: &mut S, style: &RenderStyle) -> bool {
    if !surface.is_available() {
        return false;
    }
    surface.clear();
    for (row, col) in grid.alive_cells() {
        surface.fill_cell(
            col as f32 * style.pitch,
            row as f32 * style.pitch,
            style.pitch,
            style.live_color,
        );
    }
    true
}
