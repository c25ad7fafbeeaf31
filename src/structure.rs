//! Cellular automata pass that lays down the cave-like base structure.

use rand::Rng;

use crate::config::{roll, StructureConfig};
use crate::grid::{Grid, Tile};
use crate::Stage;

#[derive(Debug, Clone, Copy, Default)]
pub struct StructureGenerator {
    pub config: StructureConfig,
}

impl StructureGenerator {
    pub fn new(config: StructureConfig) -> Self {
        Self { config }
    }

    fn seed(&self, grid: &mut Grid, rng: &mut impl Rng) {
        for pos in grid.interior().collect::<Vec<_>>() {
            let tile = if roll(rng, self.config.wall_chance) {
                Tile::Wall
            } else {
                Tile::Path
            };
            grid.set(pos, tile);
        }
    }

    /// One smoothing generation. Reads only from `grid` and writes into a
    /// copy, so the sweep order has no effect on the result.
    pub fn smooth(&self, grid: &Grid) -> Grid {
        let mut next = grid.clone();
        for pos in grid.interior() {
            let walls = grid.moore_count(pos, |t| t == Tile::Wall);
            let tile = if walls >= self.config.wall_threshold {
                Tile::Wall
            } else {
                Tile::Path
            };
            next.set(pos, tile);
        }
        next
    }
}

impl Stage for StructureGenerator {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        self.seed(grid, rng);
        for _ in 0..self.config.iterations {
            *grid = self.smooth(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Pos;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn leaves_border_and_only_writes_wall_or_path() {
        let stage = StructureGenerator::default();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = Grid::default();
            stage.apply(&mut grid, &mut rng);
            for pos in grid.positions() {
                let tile = grid.get(pos);
                if grid.is_border(pos) {
                    assert_eq!(tile, Tile::Wall, "border touched at {pos:?}");
                } else {
                    assert!(matches!(tile, Tile::Wall | Tile::Path));
                }
            }
        }
    }

    #[test]
    fn zero_wall_chance_without_smoothing_opens_interior() {
        let stage = StructureGenerator::new(StructureConfig {
            wall_chance: 0,
            iterations: 0,
            wall_threshold: 6,
        });
        let mut grid = Grid::default();
        stage.apply(&mut grid, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(grid.count(Tile::Path), 13 * 6);
    }

    #[test]
    fn smoothing_uses_previous_generation() {
        let grid = Grid::from_rows(&[
            "#######", //
            "#     #",
            "#     #",
            "#     #",
            "#######",
        ])
        .unwrap();
        let stage = StructureGenerator::default();
        let next = stage.smooth(&grid);
        // Corner interior cells have 5 wall neighbours, edge cells 3, centre 0.
        assert_eq!(next.get(Pos::new(1, 1)), Tile::Path);
        assert_eq!(next.get(Pos::new(3, 2)), Tile::Path);

        // A lone path in a wall field closes; its neighbours still count
        // the old hole.
        let mut filled = Grid::new(7, 5);
        filled.set(Pos::new(3, 2), Tile::Path);
        let next = stage.smooth(&filled);
        assert_eq!(next.get(Pos::new(3, 2)), Tile::Wall);
        // (2,2) counts 7 walls in the old grid, so it stays a wall.
        assert_eq!(next.get(Pos::new(2, 2)), Tile::Wall);
    }

    #[test]
    fn smoothing_is_order_independent() {
        let grid = Grid::from_rows(&[
            "########", //
            "# ## # #",
            "##  ## #",
            "# #  # #",
            "########",
        ])
        .unwrap();
        let stage = StructureGenerator::default();
        let next = stage.smooth(&grid);
        for pos in grid.interior() {
            let walls = grid.moore_count(pos, |t| t == Tile::Wall);
            let expected = if walls >= 6 { Tile::Wall } else { Tile::Path };
            assert_eq!(next.get(pos), expected, "at {pos:?}");
        }
    }
}
