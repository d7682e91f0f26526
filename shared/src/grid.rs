use crate::grid::CellState::{Alive, Dead};
use rand::Rng;

/// Moore neighborhood offsets as (dx, dy).
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn value(self) -> i32 {
        match self {
            Alive => 1,
            Dead => 0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Alive => Dead,
            Dead => Alive,
        }
    }
}

/// Square grid of `divisions` x `divisions` cells stored row-major.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grid {
    divisions: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(divisions: usize) -> Self {
        Grid {
            divisions,
            cells: vec![Dead; divisions * divisions],
        }
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.divisions + x
    }

    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        let index = self.index(x, y);
        self.cells[index] = state;
    }

    /// Flip a single cell in place.
    pub fn toggle(&mut self, x: usize, y: usize) {
        let index = self.index(x, y);
        self.cells[index] = self.cells[index].toggled();
    }

    pub fn clear(&mut self) {
        self.cells.fill(Dead);
    }

    pub fn randomize(&mut self) {
        let mut rng = rand::rng();
        self.randomize_with(&mut rng, 0.5);
    }

    /// Fill with live cells at `density`, clamped to [0, 1]. A non-finite
    /// density falls back to 0.5.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_finite() {
            density.clamp(0.0, 1.0)
        } else {
            0.5
        };
        for cell in self.cells.iter_mut() {
            *cell = if rng.random_bool(density) { Alive } else { Dead };
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let divisions = self.divisions;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Alive)
            .map(move |(index, _)| (index % divisions, index / divisions))
    }

    /// Neighbor count where every out-of-bounds neighbor subtracts the cell's
    /// own value instead of counting as dead. Can go negative.
    pub fn edge_adjusted_sum(&self, x: usize, y: usize) -> i32 {
        let own = self.get(x, y).value();
        let bound = self.divisions as isize;
        let mut sum = 0;

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;

            if nx < 0 || ny < 0 || nx >= bound || ny >= bound {
                sum -= own;
            } else {
                sum += self.get(nx as usize, ny as usize).value();
            }
        }

        sum
    }

    /// Next state of a single cell from its edge-adjusted sum.
    pub fn next_state(current: CellState, sum: i32) -> CellState {
        match sum {
            3 => Alive,
            2 => current,
            _ => Dead,
        }
    }

    /// Write the next generation into `next`, leaving `self` untouched.
    /// `next` is resized to match if it was built for another size.
    pub fn advance_into(&self, next: &mut Grid) {
        if next.divisions != self.divisions {
            *next = Grid::new(self.divisions);
        }

        for y in 0..self.divisions {
            for x in 0..self.divisions {
                let sum = self.edge_adjusted_sum(x, y);
                let index = self.index(x, y);
                next.cells[index] = Self::next_state(self.cells[index], sum);
            }
        }
    }

    /// Advance the grid by one generation into a fresh buffer.
    pub fn advance(&self) -> Grid {
        let mut next = Grid::new(self.divisions);
        self.advance_into(&mut next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(divisions: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(divisions);
        for &(x, y) in alive {
            grid.set(x, y, Alive);
        }
        grid
    }

    fn random_grid(seed: u64, divisions: usize) -> Grid {
        let mut grid = Grid::new(divisions);
        let mut rng = StdRng::seed_from_u64(seed);
        grid.randomize_with(&mut rng, 0.4);
        grid
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(8);
        assert_eq!(grid.divisions(), 8);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_twice_restores_cell() {
        let mut grid = Grid::new(5);
        assert_eq!(grid.get(2, 3), Dead);
        grid.toggle(2, 3);
        assert_eq!(grid.get(2, 3), Alive);
        grid.toggle(2, 3);
        assert_eq!(grid.get(2, 3), Dead);
    }

    #[test]
    fn set_is_row_major() {
        let grid = grid_with(4, &[(3, 1)]);
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(3, 1)]);
        assert_eq!(grid.get(1, 3), Dead);
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let grid = Grid::new(3);
        grid.get(0, 3);
    }

    #[test]
    fn interior_sum_counts_live_neighbors() {
        let grid = grid_with(5, &[(1, 1), (2, 1), (3, 3), (2, 2)]);
        assert_eq!(grid.edge_adjusted_sum(2, 2), 3);
    }

    #[test]
    fn live_corner_subtracts_itself_for_each_missing_neighbor() {
        // (0, 0) has five neighbors outside the grid.
        let grid = grid_with(4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.edge_adjusted_sum(0, 0), 3 - 5);
    }

    #[test]
    fn live_edge_cell_subtracts_three() {
        let grid = grid_with(4, &[(2, 0)]);
        assert_eq!(grid.edge_adjusted_sum(2, 0), -3);
    }

    #[test]
    fn dead_border_cell_is_not_penalised() {
        let grid = grid_with(4, &[(1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.edge_adjusted_sum(0, 0), 3);
        assert_eq!(grid.advance().get(0, 0), Alive);
    }

    #[test]
    fn single_center_cell_dies() {
        let grid = grid_with(3, &[(1, 1)]);
        let next = grid.advance();
        assert_eq!(next.get(1, 1), Dead);
        assert_eq!(next.get(0, 0), Dead);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn blinker_in_open_space_oscillates() {
        let horizontal = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);
        let vertical = horizontal.advance();
        assert_eq!(
            vertical.alive_cells().collect::<Vec<_>>(),
            vec![(2, 1), (2, 2), (2, 3)]
        );
        assert_eq!(vertical.advance(), horizontal);
    }

    #[test]
    fn block_in_corner_does_not_survive() {
        // A still life under standard rules, but the corner cell loses 5.
        let grid = grid_with(4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let next = grid.advance();
        assert_eq!(next.get(0, 0), Dead);
        assert_eq!(next.get(1, 1), Alive);
    }

    #[test]
    fn update_rule_holds_for_every_cell() {
        for seed in 0..16 {
            let grid = random_grid(seed, 12);
            let next = grid.advance();
            for y in 0..12 {
                for x in 0..12 {
                    let sum = grid.edge_adjusted_sum(x, y);
                    let expected = match sum {
                        3 => Alive,
                        2 => grid.get(x, y),
                        _ => Dead,
                    };
                    assert_eq!(next.get(x, y), expected, "cell ({x}, {y}) sum {sum}");
                }
            }
        }
    }

    #[test]
    fn advance_does_not_mutate_input() {
        let grid = random_grid(7, 20);
        let snapshot = grid.clone();
        let first = grid.advance();
        let second = grid.advance();
        assert_eq!(grid, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn advance_into_matches_advance_and_reuses_buffer() {
        let grid = random_grid(3, 10);
        let mut next = random_grid(99, 10);
        grid.advance_into(&mut next);
        assert_eq!(next, grid.advance());
    }

    #[test]
    fn advance_into_resizes_mismatched_buffer() {
        let grid = grid_with(6, &[(1, 2), (2, 2), (3, 2)]);
        let mut next = Grid::new(2);
        grid.advance_into(&mut next);
        assert_eq!(next.divisions(), 6);
        assert_eq!(next, grid.advance());
    }

    #[test]
    fn empty_grid_advances_to_itself() {
        let grid = Grid::new(0);
        assert_eq!(grid.advance(), grid);
    }

    #[test]
    fn randomize_with_extreme_densities() {
        let mut grid = Grid::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        grid.randomize_with(&mut rng, 1.0);
        assert_eq!(grid.population(), 100);
        grid.randomize_with(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn randomize_with_out_of_range_densities() {
        let mut grid = Grid::new(10);
        let mut rng = StdRng::seed_from_u64(2);
        grid.randomize_with(&mut rng, 7.5);
        assert_eq!(grid.population(), 100);
        grid.randomize_with(&mut rng, -1.0);
        assert_eq!(grid.population(), 0);

        for density in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            grid.randomize_with(&mut rng, density);
            let population = grid.population();
            assert!(population > 0 && population < 100, "{density}: {population}");
        }
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = random_grid(5, 10);
        grid.randomize();
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
