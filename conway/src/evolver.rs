// evolver.rs - Advances a grid one generation at a time

use crate::grid::{Cell, Dimensions, Grid, count_live_neighbors};
use crate::patterns::{self, Pattern};
use crate::render::{RenderStyle, Surface, SurfaceSize, render};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use tracing::{debug, info, trace, warn};

/// Conway's B3/S23 rule.
pub fn apply_rule(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3) => Cell::Alive,                     // Birth
        _ => Cell::Dead,                                    // Death or stays dead
    }
}

fn evolve_row(current: &Grid, row: usize, out: &mut [Cell]) {
    for (col, slot) in out.iter_mut().enumerate() {
        let cell = current.get(row, col).unwrap_or_default();
        *slot = apply_rule(cell, count_live_neighbors(current, row, col));
    }
}

/// Computes the generation after `current` into a fresh buffer.
pub fn next_generation(current: &Grid) -> Grid {
    let mut next = Grid::new(current.dimensions());
    next_generation_into(current, &mut next);
    next
}

/// Same as [`next_generation`] but reuses `next` as the output buffer.
pub fn next_generation_into(current: &Grid, next: &mut Grid) {
    if next.dimensions() != current.dimensions() {
        next.reset(current.dimensions());
    }
    for row in 0..current.height() {
        evolve_row(current, row, next.row_mut(row));
    }
}

/// Row-at-a-time version that yields to the runtime after every row.
pub async fn next_generation_cooperative(current: &Grid) -> Grid {
    let mut next = Grid::new(current.dimensions());
    next_generation_cooperative_into(current, &mut next).await;
    next
}

pub async fn next_generation_cooperative_into(current: &Grid, next: &mut Grid) {
    if next.dimensions() != current.dimensions() {
        next.reset(current.dimensions());
    }
    for row in 0..current.height() {
        evolve_row(current, row, next.row_mut(row));
        tokio::task::yield_now().await; // Cooperative yielding
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolverSettings {
    pub cell_pitch: f32,
    pub initial_density: f64,
    pub seed: Option<u64>,
    /// How many recent grid checksums to remember for cycle detection. 0 disables it.
    pub history_len: usize,
}

impl Default for EvolverSettings {
    fn default() -> Self {
        Self {
            cell_pitch: 12.0,
            initial_density: 0.5,
            seed: None,
            history_len: 10,
        }
    }
}

/// Ring of recent grid checksums.
#[derive(Debug, Clone)]
struct CycleHistory {
    hashes: VecDeque<u64>,
    capacity: usize,
}

impl CycleHistory {
    fn new(capacity: usize) -> Self {
        Self {
            hashes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns true if `hash` was seen recently, otherwise records it.
    fn observe(&mut self, hash: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.hashes.contains(&hash) {
            return true;
        }
        if self.hashes.len() == self.capacity {
            self.hashes.pop_front();
        }
        self.hashes.push_back(hash);
        false
    }

    fn clear(&mut self) {
        self.hashes.clear();
    }
}

/// Result of advancing one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub generation: u64,
    pub population: usize,
    /// The new generation repeats one of the recently seen ones.
    pub cycle_detected: bool,
    /// A pending resize replaced the grid before this step.
    pub resized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub advance: Advance,
    pub rendered: bool,
}

/// Owns the current generation and steps it forward.
///
/// Two buffers are kept: the current grid and a spare one that receives the
/// next generation before the two are swapped.
pub struct GridEvolver {
    current: Grid,
    spare: Grid,
    generation: u64,
    pending_resize: Option<Dimensions>,
    settings: EvolverSettings,
    rng: StdRng,
    history: CycleHistory,
}

impl GridEvolver {
    /// Starts from a random grid sized for `size`.
    pub fn new(size: SurfaceSize, settings: EvolverSettings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dims = size.dimensions(settings.cell_pitch);
        let grid = patterns::seed_random(dims, &mut rng, settings.initial_density);
        info!(
            height = dims.height(),
            width = dims.width(),
            population = grid.population(),
            "seeded initial grid"
        );
        Self::from_parts(grid, rng, settings)
    }

    /// Starts from a caller-provided grid.
    pub fn with_grid(grid: Grid, settings: EvolverSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_parts(grid, rng, settings)
    }

    fn from_parts(grid: Grid, rng: StdRng, settings: EvolverSettings) -> Self {
        Self {
            spare: Grid::new(grid.dimensions()),
            current: grid,
            generation: 0,
            pending_resize: None,
            history: CycleHistory::new(settings.history_len),
            settings,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> Dimensions {
        self.current.dimensions()
    }

    pub fn settings(&self) -> &EvolverSettings {
        &self.settings
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Records a surface size change. The grid is replaced at the next tick boundary.
    pub fn request_resize(&mut self, size: SurfaceSize) {
        self.pending_resize = Some(size.dimensions(self.settings.cell_pitch));
    }

    /// Replaces the grid with a freshly seeded one if a pending resize changes its shape.
    pub fn apply_pending_resize(&mut self) -> bool {
        let Some(dims) = self.pending_resize.take() else {
            return false;
        };
        if dims == self.current.dimensions() {
            return false;
        }
        debug!(
            from_height = self.current.height(),
            from_width = self.current.width(),
            height = dims.height(),
            width = dims.width(),
            "resizing grid"
        );
        self.current = patterns::seed_random(dims, &mut self.rng, self.settings.initial_density);
        self.spare.reset(dims);
        self.restart();
        true
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.history.clear();
    }

    fn finish_step(&mut self, resized: bool) -> Advance {
        std::mem::swap(&mut self.current, &mut self.spare);
        self.generation += 1;
        let cycle_detected = self.history.observe(self.current.checksum());
        if cycle_detected {
            debug!(generation = self.generation, "grid repeats a recent generation");
        }
        let advance = Advance {
            generation: self.generation,
            population: self.current.population(),
            cycle_detected,
            resized,
        };
        trace!(?advance, "advanced");
        advance
    }

    pub fn advance(&mut self) -> Advance {
        let resized = self.apply_pending_resize();
        next_generation_into(&self.current, &mut self.spare);
        self.finish_step(resized)
    }

    /// Like [`advance`](Self::advance), yielding to the runtime between rows.
    pub async fn advance_cooperative(&mut self) -> Advance {
        let resized = self.apply_pending_resize();
        next_generation_cooperative_into(&self.current, &mut self.spare).await;
        self.finish_step(resized)
    }

    /// One tick: advance, then draw if the surface is still there.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, style: &RenderStyle) -> TickOutcome {
        let advance = self.advance();
        let rendered = render(&self.current, surface, style);
        if !rendered {
            warn!(generation = advance.generation, "surface unavailable, skipped render");
        }
        TickOutcome { advance, rendered }
    }

    pub async fn tick_cooperative<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        style: &RenderStyle,
    ) -> TickOutcome {
        let advance = self.advance_cooperative().await;
        let rendered = render(&self.current, surface, style);
        if !rendered {
            warn!(generation = advance.generation, "surface unavailable, skipped render");
        }
        TickOutcome { advance, rendered }
    }

    pub fn reseed(&mut self) {
        let dims = self.current.dimensions();
        self.current = patterns::seed_random(dims, &mut self.rng, self.settings.initial_density);
        self.restart();
        info!(population = self.current.population(), "reseeded grid");
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.restart();
    }

    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.current = pattern.centered_in(self.current.dimensions());
        self.restart();
        debug!(pattern = pattern.name, population = self.current.population(), "loaded pattern");
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        let toggled = self.current.toggle(row, col);
        if toggled {
            self.history.clear();
        }
        toggled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_SIDE;

    fn settings() -> EvolverSettings {
        EvolverSettings {
            cell_pitch: 10.0,
            seed: Some(9),
            ..EvolverSettings::default()
        }
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let from_dead = apply_rule(Cell::Dead, n);
            let from_alive = apply_rule(Cell::Alive, n);
            assert_eq!(from_dead.is_alive(), n == 3, "dead with {n}");
            assert_eq!(from_alive.is_alive(), n == 2 || n == 3, "alive with {n}");
        }
    }

    #[test]
    fn into_reshapes_mismatched_buffer() {
        let current = Grid::with_alive(Dimensions::new(4, 4), [(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut next = Grid::new(Dimensions::new(1, 9));
        next_generation_into(&current, &mut next);
        assert_eq!(next, current);
    }

    #[test]
    fn cycle_history_detects_repeat() {
        let mut history = CycleHistory::new(2);
        assert!(!history.observe(1));
        assert!(!history.observe(2));
        assert!(history.observe(1));
        assert!(!history.observe(3)); // evicts 1
        assert!(!history.observe(1));
    }

    #[test]
    fn zero_history_never_reports() {
        let mut history = CycleHistory::new(0);
        assert!(!history.observe(5));
        assert!(!history.observe(5));
    }

    #[test]
    fn new_sizes_grid_from_surface() {
        let evolver = GridEvolver::new(SurfaceSize::new(95.0, 42.0), settings());
        assert_eq!(evolver.dimensions(), Dimensions::new(4, 9));
        assert_eq!(evolver.generation(), 0);
    }

    #[test]
    fn block_is_reported_as_cycle() {
        let grid = Grid::with_alive(Dimensions::new(4, 4), [(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut evolver = GridEvolver::with_grid(grid, settings());
        assert!(!evolver.advance().cycle_detected);
        assert!(evolver.advance().cycle_detected);
        assert_eq!(evolver.generation(), 2);
    }

    #[test]
    fn toggle_forgets_cycle_history() {
        let grid = Grid::with_alive(Dimensions::new(6, 6), [(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut evolver = GridEvolver::with_grid(grid, settings());
        evolver.advance();
        assert!(evolver.advance().cycle_detected);

        // Toggle a far cell twice: the grid is unchanged but the history is gone
        assert!(evolver.toggle_cell(5, 5));
        assert!(evolver.toggle_cell(5, 5));
        assert!(!evolver.advance().cycle_detected);
        assert!(evolver.advance().cycle_detected);
    }

    #[test]
    fn tiny_pitch_builds_a_bounded_grid() {
        let settings = EvolverSettings {
            cell_pitch: 1e-8,
            initial_density: 0.0,
            ..settings()
        };
        let evolver = GridEvolver::new(SurfaceSize::new(800.0, 950.0), settings);
        let dims = evolver.dimensions();
        assert_eq!((dims.height(), dims.width()), (MAX_SIDE, MAX_SIDE));
    }

    #[test]
    fn nan_density_still_seeds() {
        let settings = EvolverSettings {
            initial_density: f64::NAN,
            ..settings()
        };
        let evolver = GridEvolver::new(SurfaceSize::new(100.0, 100.0), settings);
        assert_eq!(evolver.dimensions(), Dimensions::new(10, 10));
    }

    #[test]
    fn editing_resets_generation() {
        let mut evolver = GridEvolver::new(SurfaceSize::new(100.0, 100.0), settings());
        evolver.advance();
        evolver.advance();
        evolver.clear();
        assert_eq!(evolver.generation(), 0);
        assert_eq!(evolver.grid().population(), 0);

        evolver.advance();
        evolver.reseed();
        assert_eq!(evolver.generation(), 0);
    }

    #[test]
    fn toggle_outside_grid_is_ignored() {
        let mut evolver = GridEvolver::with_grid(Grid::new(Dimensions::new(3, 3)), settings());
        assert!(!evolver.toggle_cell(3, 0));
        assert!(evolver.toggle_cell(2, 2));
        assert!(evolver.grid().is_alive(2, 2));
    }

    #[test]
    fn same_size_resize_keeps_grid() {
        let mut evolver = GridEvolver::new(SurfaceSize::new(50.0, 50.0), settings());
        let before = evolver.grid().clone();
        evolver.request_resize(SurfaceSize::new(55.0, 58.0));
        assert!(!evolver.apply_pending_resize());
        assert!(!evolver.has_pending_resize());
        assert_eq!(evolver.grid(), &before);
    }
}
