use arena_gen::config::{CarverConfig, FeatureConfig, StructureConfig, ThinnerConfig};
use arena_gen::{Generator, GeneratorConfig, Grid, Tile};

/// Walkers carving a solid block with no decoration. Most attempts pass, so
/// whole-pipeline tests stay fast.
pub fn trail_generator() -> Generator {
    Generator::new(GeneratorConfig {
        structure: StructureConfig {
            wall_chance: 100,
            iterations: 1,
            wall_threshold: 6,
        },
        carver: CarverConfig {
            walkers: 2,
            steps: 30,
        },
        features: FeatureConfig {
            feature_chance: 0,
            power_up_chance: 0,
        },
        thinner: ThinnerConfig {
            open_threshold: 8,
            wall_chance: 0,
        },
        ..GeneratorConfig::default()
    })
    .expect("trail config is valid")
}

pub fn border_is_wall(grid: &Grid) -> bool {
    grid.positions()
        .filter(|&p| grid.is_border(p))
        .all(|p| grid.get(p) == Tile::Wall)
}
