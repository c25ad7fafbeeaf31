//! Walls off paths sitting in large open plains.
//!
//! The sweep is in place and row-major: a path converted earlier in the pass
//! no longer counts as open for the cells after it. Nothing here preserves
//! connectivity, which is why validation runs afterwards.

use rand::Rng;

use crate::config::{roll, ThinnerConfig};
use crate::grid::{Grid, Tile};
use crate::Stage;

#[derive(Debug, Clone, Copy, Default)]
pub struct DensityThinner {
    pub config: ThinnerConfig,
}

impl DensityThinner {
    pub fn new(config: ThinnerConfig) -> Self {
        Self { config }
    }
}

impl Stage for DensityThinner {
    fn name(&self) -> &'static str {
        "thinner"
    }

    fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        for pos in grid.interior().collect::<Vec<_>>() {
            if grid.get(pos) != Tile::Path {
                continue;
            }
            let open = grid.moore_count(pos, Tile::is_open);
            if open >= self.config.open_threshold && roll(rng, self.config.wall_chance) {
                grid.set(pos, Tile::Wall);
            }
        }
    }
}
