// grid.rs - Grid types for Conway's Game of Life

use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Relative positions of the 8 neighbours around a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Longest side a grid may have, in cells.
pub const MAX_SIDE: usize = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Grid size in cells. Both sides are always within `1..=MAX_SIDE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height.clamp(1, MAX_SIDE),
            width: width.clamp(1, MAX_SIDE),
        }
    }

    /// Derives the grid size from a drawing surface measured in pixels.
    ///
    /// Degenerate surfaces (zero, negative, NaN) clamp to a single cell, and a
    /// non-positive pitch is treated as one pixel per cell.
    pub fn from_surface(width_px: f32, height_px: f32, pitch: f32) -> Self {
        let pitch = if pitch.is_finite() && pitch > 0.0 { pitch } else { 1.0 };
        let cells = |px: f32| {
            if px.is_finite() && px > 0.0 {
                (px / pitch).floor().min(MAX_SIDE as f32) as usize
            } else {
                0
            }
        };
        Self::new(cells(height_px), cells(width_px))
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }
}

/// A rectangular generation of cells, stored row-major.
///
/// The dimensions live next to the cell buffer and are never updated on their
/// own, so a reader can't see a buffer whose shape disagrees with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::Dead; dims.cell_count()],
        }
    }

    /// Each cell is independently alive with probability `density`.
    /// A non-finite density falls back to 0.5.
    pub fn random<R: Rng + ?Sized>(dims: Dimensions, rng: &mut R, density: f64) -> Self {
        let density = if density.is_finite() { density.clamp(0.0, 1.0) } else { 0.5 };
        let cells = (0..dims.cell_count())
            .map(|_| Cell::from(rng.gen_bool(density)))
            .collect();
        Self { dims, cells }
    }

    /// All dead except the listed coordinates. Coordinates outside the grid are dropped.
    pub fn with_alive<I>(dims: Dimensions, alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(dims);
        for (row, col) in alive {
            grid.set(row, col, Cell::Alive);
        }
        grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.dims
            .contains(row, col)
            .then(|| row * self.dims.width + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    /// Returns false when the coordinate is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = Cell::from(!self.cells[i].is_alive());
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Reshapes to `dims` and kills every cell.
    pub(crate) fn reset(&mut self, dims: Dimensions) {
        self.dims = dims;
        self.cells.clear();
        self.cells.resize(dims.cell_count(), Cell::Dead);
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.dims.height {
            return None;
        }
        let start = row * self.dims.width;
        Some(&self.cells[start..start + self.dims.width])
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.dims.width;
        &mut self.cells[start..start + self.dims.width]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every alive cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.dims.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Hash of the shape and every cell state.
    pub fn checksum(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.dims.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

/// Counts alive cells among the 8 neighbours of `(row, col)`.
///
/// Neighbours outside `[0, height) x [0, width)` are absent: the grid does not
/// wrap around.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let nr = row.checked_add_signed(dr)?;
            let nc = col.checked_add_signed(dc)?;
            grid.get(nr, nc)
        })
        .map(|cell| cell as u8)
        .sum()
}
