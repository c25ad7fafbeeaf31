use rand::Rng;

use crate::config::{roll, FeatureConfig};
use crate::grid::{Grid, Tile};
use crate::Stage;

/// Decorates open paths with soft blocks and power-ups.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturePlacer {
    pub config: FeatureConfig,
}

impl FeaturePlacer {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }
}

impl Stage for FeaturePlacer {
    fn name(&self) -> &'static str {
        "features"
    }

    fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        for pos in grid.interior().collect::<Vec<_>>() {
            if grid.get(pos) != Tile::Path || !roll(rng, self.config.feature_chance) {
                continue;
            }
            let feature = if roll(rng, self.config.power_up_chance) {
                Tile::PowerUp
            } else {
                Tile::SoftBlock
            };
            grid.set(pos, feature);
        }
    }
}
