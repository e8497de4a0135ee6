// ui.rs - Controls, canvas and statistics for the canvas window

use crate::CanvasApp;
use crate::surface::{PainterSurface, from_color32};
use conway::{PATTERNS, RenderStyle, SurfaceSize, render};
use eframe::egui;
use std::time::{Duration, Instant};
use tracing::info;

impl CanvasApp {
    fn step(&mut self) {
        let advance = self.runtime.block_on(self.evolver.advance_cooperative());
        self.last_update = Instant::now();
        if advance.cycle_detected && self.pause_on_cycle && self.is_running {
            self.is_running = false;
            info!(generation = advance.generation, "paused on repeating generation");
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.is_running = !self.is_running;
                if self.is_running {
                    self.last_update = Instant::now();
                }
            }

            if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                self.step();
            }

            if ui.button("⏹ Clear").clicked() {
                self.is_running = false;
                self.evolver.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.evolver.reseed();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.is_running = false;
                self.evolver.load_pattern(&PATTERNS[self.selected_pattern]);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
            if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);

            ui.separator();

            ui.checkbox(&mut self.pause_on_cycle, "Pause on cycle");
        });
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let grid = self.evolver.grid();
        let dims = grid.dimensions();
        let total = dims.cell_count();
        let live = grid.population();

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.evolver.generation()));
            ui.separator();
            ui.label(format!("Grid: {}×{}", dims.width(), dims.height()));
            ui.separator();
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        if self.canvas_size != Some(size) {
            self.canvas_size = Some(size);
            self.evolver.request_resize(SurfaceSize::new(size.x, size.y));
        }

        // Frame start is the tick boundary: resizes land here, never mid-step
        self.evolver.apply_pending_resize();
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.step();
        }

        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let style = RenderStyle {
            pitch: self.evolver.settings().cell_pitch,
            live_color: from_color32(self.live_color),
        };
        let mut surface = PainterSurface::new(&painter, response.rect, self.dead_color);
        render(self.evolver.grid(), &mut surface, &style);

        // Toggle cells only while paused
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - response.rect.min;
                if offset.x >= 0.0 && offset.y >= 0.0 {
                    let row = (offset.y / style.pitch) as usize;
                    let col = (offset.x / style.pitch) as usize;
                    if self.evolver.toggle_cell(row, col) {
                        ui.ctx().request_repaint();
                    }
                }
            }
        }
    }
}

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.label("Click cells to toggle them while paused. Resizing the window reseeds the grid.");
        });

        egui::TopBottomPanel::bottom("statistics").show(ctx, |ui| {
            self.statistics(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui);
        });

        // Keep ticking while running
        if self.is_running {
            let due = self.update_interval.saturating_sub(self.last_update.elapsed());
            ctx.request_repaint_after(due);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(generation = self.evolver.generation(), "canvas closed");
    }
}
