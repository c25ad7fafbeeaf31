//! Random walkers that force open trails between cave pockets.

use rand::Rng;

use crate::config::CarverConfig;
use crate::grid::{Grid, Pos, Tile};
use crate::Stage;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    const ALL: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    fn random(rng: &mut impl Rng) -> Dir {
        Dir::ALL[rng.gen_range(0..Dir::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathCarver {
    pub config: CarverConfig,
}

impl PathCarver {
    pub fn new(config: CarverConfig) -> Self {
        Self { config }
    }
}

/// Moves one step unless that would leave the interior.
fn step(grid: &Grid, pos: Pos, dir: Dir) -> Pos {
    match dir {
        Dir::Left if pos.x > 1 => Pos::new(pos.x - 1, pos.y),
        Dir::Right if pos.x < grid.width() - 2 => Pos::new(pos.x + 1, pos.y),
        Dir::Up if pos.y > 1 => Pos::new(pos.x, pos.y - 1),
        Dir::Down if pos.y < grid.height() - 2 => Pos::new(pos.x, pos.y + 1),
        _ => pos,
    }
}

impl Stage for PathCarver {
    fn name(&self) -> &'static str {
        "carver"
    }

    fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        for _ in 0..self.config.walkers {
            // Starts are drawn from the interior so the border ring is never
            // carved.
            let mut pos = Pos::new(
                rng.gen_range(1..grid.width() - 1),
                rng.gen_range(1..grid.height() - 1),
            );
            for _ in 0..self.config.steps {
                grid.set(pos, Tile::Path);
                pos = step(grid, pos, Dir::random(rng));
            }
        }
    }
}
