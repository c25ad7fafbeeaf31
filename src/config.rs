use rand::Rng;

use crate::generator::GenerateError;
use crate::grid::{ARENA_HEIGHT, ARENA_WIDTH};

const DEFAULT_WARN_AFTER: u64 = 1_000_000;

/// Rolls a percentage chance in `0..=100`.
pub(crate) fn roll(rng: &mut impl Rng, pct: u32) -> bool {
    rng.gen_range(0..100) < pct
}

/// Cellular automata fill and smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureConfig {
    /// Chance (percent) that an interior cell starts as a wall.
    pub wall_chance: u32,
    /// Number of smoothing passes.
    pub iterations: u32,
    /// Minimum wall neighbours (out of 8) for a cell to stay or become a wall.
    pub wall_threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarverConfig {
    pub walkers: u32,
    pub steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Chance (percent) that a path becomes a feature at all.
    pub feature_chance: u32,
    /// Chance (percent) that a placed feature is a power-up rather than a
    /// soft block.
    pub power_up_chance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinnerConfig {
    /// Minimum open neighbours (out of 8) for a path to be considered crowded.
    pub open_threshold: usize,
    /// Chance (percent) that a crowded path is walled off.
    pub wall_chance: u32,
}

/// Built-in parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Sparser walls, shorter walkers, more aggressive thinning.
    Classic,
    /// Heavier walls and longer walkers.
    #[default]
    Dense,
}

impl Preset {
    pub fn structure(self) -> StructureConfig {
        match self {
            Preset::Classic => StructureConfig {
                wall_chance: 55,
                iterations: 3,
                wall_threshold: 6,
            },
            Preset::Dense => StructureConfig {
                wall_chance: 65,
                iterations: 5,
                wall_threshold: 6,
            },
        }
    }

    pub fn carver(self) -> CarverConfig {
        match self {
            Preset::Classic => CarverConfig {
                walkers: 4,
                steps: 35,
            },
            Preset::Dense => CarverConfig {
                walkers: 4,
                steps: 50,
            },
        }
    }

    pub fn features(self) -> FeatureConfig {
        match self {
            Preset::Classic => FeatureConfig {
                feature_chance: 60,
                power_up_chance: 20,
            },
            Preset::Dense => FeatureConfig {
                feature_chance: 60,
                power_up_chance: 25,
            },
        }
    }

    pub fn thinner(self) -> ThinnerConfig {
        match self {
            Preset::Classic => ThinnerConfig {
                open_threshold: 5,
                wall_chance: 15,
            },
            Preset::Dense => ThinnerConfig {
                open_threshold: 6,
                wall_chance: 20,
            },
        }
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        Preset::default().structure()
    }
}

impl Default for CarverConfig {
    fn default() -> Self {
        Preset::default().carver()
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Preset::default().features()
    }
}

impl Default for ThinnerConfig {
    fn default() -> Self {
        Preset::default().thinner()
    }
}

/// Everything the orchestrator needs to build one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub structure: StructureConfig,
    pub carver: CarverConfig,
    pub features: FeatureConfig,
    pub thinner: ThinnerConfig,
    /// Attempts with fewer `Path` tiles than this are rejected even when
    /// connected.
    pub min_open_tiles: usize,
    /// Attempt count after which a warning is logged.
    pub warn_after: u64,
}

impl GeneratorConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            structure: preset.structure(),
            carver: preset.carver(),
            features: preset.features(),
            thinner: preset.thinner(),
            min_open_tiles: 1,
            warn_after: DEFAULT_WARN_AFTER,
        }
    }

    /// False when the stages are guaranteed to end with zero `Path` tiles.
    fn can_leave_open_tiles(&self) -> bool {
        let s = &self.structure;
        let structure_opens =
            s.wall_chance < 100 && (s.iterations == 0 || s.wall_threshold > 0);
        let carver_opens = self.carver.walkers > 0 && self.carver.steps > 0;
        let features_keep = self.features.feature_chance < 100;
        let thinner_keeps = !(self.thinner.open_threshold == 0 && self.thinner.wall_chance == 100);
        (structure_opens || carver_opens) && features_keep && thinner_keeps
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.width < 3 || self.height < 3 {
            return Err(GenerateError::InvalidConfig(format!(
                "arena must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        let percentages = [
            ("structure.wall_chance", self.structure.wall_chance),
            ("features.feature_chance", self.features.feature_chance),
            ("features.power_up_chance", self.features.power_up_chance),
            ("thinner.wall_chance", self.thinner.wall_chance),
        ];
        for (name, value) in percentages {
            if value > 100 {
                return Err(GenerateError::InvalidConfig(format!(
                    "{name} is {value}%, must be at most 100%"
                )));
            }
        }
        let thresholds = [
            ("structure.wall_threshold", self.structure.wall_threshold),
            ("thinner.open_threshold", self.thinner.open_threshold),
        ];
        for (name, value) in thresholds {
            if value > 8 {
                return Err(GenerateError::InvalidConfig(format!(
                    "{name} is {value}, a cell only has 8 neighbours"
                )));
            }
        }
        if self.min_open_tiles > 0 && !self.can_leave_open_tiles() {
            return Err(GenerateError::InvalidConfig(format!(
                "min_open_tiles is {} but no attempt can keep a path tile",
                self.min_open_tiles
            )));
        }
        let interior = (self.width - 2) * (self.height - 2);
        if self.min_open_tiles > interior {
            return Err(GenerateError::InvalidConfig(format!(
                "min_open_tiles is {}, interior only has {interior} cells",
                self.min_open_tiles
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
