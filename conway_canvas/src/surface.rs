// surface.rs - Draws cells through an egui painter

use conway::{Color, Surface};
use egui::{Color32, Painter, Rect, Vec2};

/// Gap left between neighbouring cells, in points.
const CELL_GAP: f32 = 0.5;

pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self { painter, rect, background }
    }
}

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub fn from_color32(color: Color32) -> Color {
    Color::rgb(color.r(), color.g(), color.b())
}

impl Surface for PainterSurface<'_> {
    // A minimised window leaves nothing to draw on
    fn is_available(&self) -> bool {
        self.rect.is_positive()
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn fill_cell(&mut self, x: f32, y: f32, size: f32, color: Color) {
        let side = (size - CELL_GAP).max(1.0);
        let cell = Rect::from_min_size(self.rect.min + Vec2::new(x, y), Vec2::splat(side));
        self.painter.rect_filled(cell, 1.0, to_color32(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_conversion_round_trips() {
        let color = Color::rgb(12, 200, 7);
        assert_eq!(from_color32(to_color32(color)), color);
    }
}
