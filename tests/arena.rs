mod common;

use arena_gen::connectivity::{is_fully_connected, regions};
use arena_gen::{generate, Generator, GeneratorConfig, Grid, Pos, Preset, Tile};
use common::{border_is_wall, trail_generator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Default parameters accept roughly one attempt in 72,000, so this is the
// only test that runs them to acceptance.
#[test]
fn generate_returns_playable_arena() {
    let grid = generate();
    assert_eq!((grid.width(), grid.height()), (15, 8));
    assert!(border_is_wall(&grid));
    assert!(is_fully_connected(&grid));
    assert!(grid.count(Tile::Path) >= 1);
}

#[test]
fn seeded_generation_is_reproducible() {
    let generator = trail_generator();
    let first = generator.generate_with_stats(&mut ChaCha8Rng::seed_from_u64(2024));
    let second = generator.generate_with_stats(&mut ChaCha8Rng::seed_from_u64(2024));
    assert_eq!(first, second);
}

#[test]
fn accepted_arenas_are_connected_with_wall_border() {
    let generator = trail_generator();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..30 {
        let grid = generator.generate(&mut rng);
        assert!(border_is_wall(&grid));
        assert_eq!(regions(&grid), 1);
    }
}

#[test]
fn preset_attempts_keep_border_and_gate_agrees_with_validator() {
    for preset in [Preset::Classic, Preset::Dense] {
        let generator = Generator::new(GeneratorConfig::preset(preset)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let grid = generator.attempt(&mut rng);
            assert!(border_is_wall(&grid));
            let expected = grid.count(Tile::Path) >= 1 && is_fully_connected(&grid);
            assert_eq!(generator.check(&grid).is_ok(), expected);
        }
    }
}

#[test]
fn larger_arena_respects_dimensions() {
    let mut config = GeneratorConfig::default();
    config.width = 31;
    config.height = 15;
    let generator = Generator::new(config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..50 {
        let grid = generator.attempt(&mut rng);
        assert_eq!((grid.width(), grid.height()), (31, 15));
        assert!(border_is_wall(&grid));
    }
}

#[test]
fn display_uses_arena_glyphs() {
    let grid = Generator::default().attempt(&mut ChaCha8Rng::seed_from_u64(17));
    let text = grid.to_string();
    assert_eq!(text.lines().count(), 8);
    for line in text.lines() {
        assert_eq!(line.chars().count(), 15);
        assert!(line.chars().all(|c| matches!(c, '#' | ' ' | '+' | '*')));
    }
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(Grid::from_rows(&lines).unwrap(), grid);
}

#[test]
fn validator_scenarios() {
    let mut open = Grid::default();
    for pos in open.interior().collect::<Vec<_>>() {
        open.set(pos, Tile::Path);
    }
    assert!(is_fully_connected(&open));

    let mut checker = Grid::default();
    for pos in checker.interior().collect::<Vec<_>>() {
        if (pos.x + pos.y) % 2 == 1 {
            checker.set(pos, Tile::Path);
        }
    }
    assert!(!is_fully_connected(&checker));

    let mut single = Grid::default();
    single.set(Pos::new(1, 6), Tile::Path);
    assert!(is_fully_connected(&single));

    assert!(is_fully_connected(&Grid::default()));
}
