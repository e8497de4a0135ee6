use conway::patterns;
use conway::{Cell, Dimensions, Grid, count_live_neighbors, next_generation, next_generation_cooperative};
use proptest::prelude::*;

fn arb_grid(max_side: usize) -> impl Strategy<Value = Grid> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(height, width)| {
        prop::collection::vec(any::<bool>(), height * width).prop_map(move |cells| {
            let dims = Dimensions::new(height, width);
            let alive = cells
                .into_iter()
                .enumerate()
                .filter(|(_, alive)| *alive)
                .map(move |(i, _)| (i / width, i % width));
            Grid::with_alive(dims, alive)
        })
    })
}

/// Neighbour count by brute force over the whole grid.
fn reference_count(grid: &Grid, row: usize, col: usize) -> u8 {
    grid.alive_cells()
        .filter(|&(r, c)| (r, c) != (row, col) && r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1)
        .count() as u8
}

proptest! {
    #[test]
    fn birth_and_survival_follow_neighbour_counts(grid in arb_grid(12)) {
        let next = next_generation(&grid);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let n = count_live_neighbors(&grid, row, col);
                let expected = match (grid.get(row, col), n) {
                    (Some(Cell::Dead), 3) => Cell::Alive,
                    (Some(Cell::Alive), 2 | 3) => Cell::Alive,
                    _ => Cell::Dead,
                };
                prop_assert_eq!(next.get(row, col), Some(expected));
            }
        }
    }

    #[test]
    fn neighbour_count_matches_brute_force(grid in arb_grid(10)) {
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let n = count_live_neighbors(&grid, row, col);
                prop_assert!(n <= 8);
                prop_assert_eq!(n, reference_count(&grid, row, col));
            }
        }
    }

    #[test]
    fn input_is_never_mutated(grid in arb_grid(16)) {
        let before = grid.checksum();
        let copy = grid.clone();
        let next = next_generation(&grid);
        prop_assert_eq!(grid.checksum(), before);
        prop_assert_eq!(&grid, &copy);
        prop_assert_eq!(next.dimensions(), grid.dimensions());
    }

    #[test]
    fn dead_grid_stays_dead(height in 1usize..40, width in 1usize..40) {
        let grid = Grid::new(Dimensions::new(height, width));
        prop_assert_eq!(next_generation(&grid).population(), 0);
    }

    #[test]
    fn step_is_deterministic(grid in arb_grid(12)) {
        prop_assert_eq!(next_generation(&grid), next_generation(&grid));
    }
}

#[test]
fn lone_cell_dies() {
    let grid = Grid::with_alive(Dimensions::new(3, 3), [(1, 1)]);
    assert_eq!(next_generation(&grid).population(), 0);
}

#[test]
fn block_is_a_still_life() {
    for side in 4..8 {
        let block = patterns::find("Block").unwrap().centered_in(Dimensions::new(side, side));
        assert_eq!(next_generation(&block), block, "side {side}");
    }
}

#[test]
fn blinker_has_period_two() {
    let blinker = patterns::find("Blinker").unwrap().centered_in(Dimensions::new(5, 5));
    let once = next_generation(&blinker);
    assert_ne!(once, blinker);
    assert_eq!(once.alive_cells().collect::<Vec<_>>(), vec![(1, 2), (2, 2), (3, 2)]);
    assert_eq!(next_generation(&once), blinker);
}

#[test]
fn glider_travels_diagonally() {
    let dims = Dimensions::new(10, 10);
    let glider = patterns::find("Glider").unwrap().centered_in(dims);
    let mut grid = glider.clone();
    for _ in 0..4 {
        grid = next_generation(&grid);
    }
    let shifted: Vec<_> = glider.alive_cells().map(|(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(grid.alive_cells().collect::<Vec<_>>(), shifted);
}

#[test]
fn no_wraparound_at_edges() {
    // A blinker on the top edge would gain cells on the bottom row if the grid wrapped.
    let grid = Grid::with_alive(Dimensions::new(5, 5), [(0, 1), (0, 2), (0, 3)]);
    let next = next_generation(&grid);
    assert_eq!(next.alive_cells().collect::<Vec<_>>(), vec![(0, 2), (1, 2)]);
}

#[test]
fn corner_cells_count_only_in_bounds_neighbours() {
    let dims = Dimensions::new(3, 3);
    let full = Grid::with_alive(dims, (0..3).flat_map(|r| (0..3).map(move |c| (r, c))));
    for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert_eq!(count_live_neighbors(&full, row, col), 3);
    }
    for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
        assert_eq!(count_live_neighbors(&full, row, col), 5);
    }
    assert_eq!(count_live_neighbors(&full, 1, 1), 8);
}

#[tokio::test]
async fn cooperative_step_matches_pure_step() {
    for pattern in patterns::PATTERNS {
        let grid = pattern.centered_in(Dimensions::new(20, 40));
        assert_eq!(next_generation_cooperative(&grid).await, next_generation(&grid), "{}", pattern.name);
    }
}
