//! Runs the generation stages and retries until an arena passes validation.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::carver::PathCarver;
use crate::config::GeneratorConfig;
use crate::connectivity::is_fully_connected;
use crate::features::FeaturePlacer;
use crate::grid::{Grid, Tile};
use crate::structure::StructureGenerator;
use crate::thinner::DensityThinner;
use crate::Stage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no valid arena after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}

/// Why an attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Disconnected,
    TooFewOpenTiles { open: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Total pipeline runs, including the accepted one.
    pub attempts: u64,
    pub disconnected: u64,
    pub too_sparse: u64,
}

impl GenerationStats {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Disconnected => self.disconnected += 1,
            Rejection::TooFewOpenTiles { .. } => self.too_sparse += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
    structure: StructureGenerator,
    carver: PathCarver,
    features: FeaturePlacer,
    thinner: DensityThinner,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            structure: StructureGenerator::new(config.structure),
            carver: PathCarver::new(config.carver),
            features: FeaturePlacer::new(config.features),
            thinner: DensityThinner::new(config.thinner),
        })
    }

    /// One unvalidated run of the four stages on a fresh grid.
    pub fn attempt<R: Rng>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::new(self.config.width, self.config.height);
        run_stage(&self.structure, &mut grid, rng);
        run_stage(&self.carver, &mut grid, rng);
        run_stage(&self.features, &mut grid, rng);
        run_stage(&self.thinner, &mut grid, rng);
        grid
    }

    /// Acceptance gate applied to each attempt.
    pub fn check(&self, grid: &Grid) -> Result<(), Rejection> {
        let open = grid.count(Tile::Path);
        if open < self.config.min_open_tiles {
            return Err(Rejection::TooFewOpenTiles { open });
        }
        if !is_fully_connected(grid) {
            return Err(Rejection::Disconnected);
        }
        Ok(())
    }

    /// Generates arenas until one is accepted. There is no attempt limit.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Grid {
        self.generate_with_stats(rng).0
    }

    pub fn generate_with_stats<R: Rng>(&self, rng: &mut R) -> (Grid, GenerationStats) {
        let mut stats = GenerationStats::default();
        loop {
            if let Some(grid) = self.next_attempt(rng, &mut stats) {
                return (grid, stats);
            }
        }
    }

    /// Like [`Generator::generate`] but gives up after `max_attempts`.
    pub fn try_generate<R: Rng>(
        &self,
        rng: &mut R,
        max_attempts: u64,
    ) -> Result<Grid, GenerateError> {
        let mut stats = GenerationStats::default();
        while stats.attempts < max_attempts {
            if let Some(grid) = self.next_attempt(rng, &mut stats) {
                return Ok(grid);
            }
        }
        Err(GenerateError::AttemptsExhausted {
            attempts: stats.attempts,
        })
    }

    fn next_attempt<R: Rng>(&self, rng: &mut R, stats: &mut GenerationStats) -> Option<Grid> {
        stats.attempts += 1;
        let grid = self.attempt(rng);
        match self.check(&grid) {
            Ok(()) => {
                debug!(
                    attempts = stats.attempts,
                    paths = grid.count(Tile::Path),
                    soft_blocks = grid.count(Tile::SoftBlock),
                    power_ups = grid.count(Tile::PowerUp),
                    "arena accepted"
                );
                Some(grid)
            }
            Err(rejection) => {
                trace!(attempt = stats.attempts, ?rejection, "arena rejected");
                stats.record(rejection);
                if stats.attempts == self.config.warn_after {
                    warn!(
                        attempts = stats.attempts,
                        disconnected = stats.disconnected,
                        too_sparse = stats.too_sparse,
                        "arena generation is retrying unusually often"
                    );
                }
                None
            }
        }
    }
}

fn run_stage<S: Stage, R: Rng>(stage: &S, grid: &mut Grid, rng: &mut R) {
    stage.apply(grid, rng);
    trace!(stage = stage.name(), paths = grid.count(Tile::Path), "stage done");
}
