//! Procedural arena generation for a grid-based action game.
//!
//! An arena is built by four stages run in order on a fresh wall-filled
//! [`Grid`]: cellular automata structure, random-walk carving, feature
//! placement and density thinning. The result is accepted only when every
//! open path tile is reachable from every other one; otherwise the whole
//! pipeline runs again.

pub mod carver;
pub mod config;
pub mod connectivity;
pub mod features;
pub mod generator;
pub mod grid;
pub mod render;
pub mod structure;
pub mod thinner;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use config::{GeneratorConfig, Preset};
pub use generator::{GenerateError, GenerationStats, Generator, Rejection};
pub use grid::{Grid, GridParseError, Pos, Tile, ARENA_HEIGHT, ARENA_WIDTH};

/// One pass of the generation pipeline. Stages only touch the grid they are
/// given and draw all randomness from `rng`.
pub trait Stage {
    /// Short label used in trace logs.
    fn name(&self) -> &'static str;
    /// Mutates `grid` in place. Border cells are never written.
    fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R);
}

/// Generates a validated arena with the default settings and a freshly
/// seeded random source.
pub fn generate() -> Grid {
    let mut rng = ChaCha8Rng::from_entropy();
    Generator::default().generate(&mut rng)
}
