use std::io::{self, Stdout};

use arena_gen::render::Renderer;
use arena_gen::{Generator, GenerationStats, Grid, Tile};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log output goes to stderr; redirect it (`2>arena.log`) when raising
/// `RUST_LOG` above the default so it does not draw over the arena.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> io::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = ChaCha8Rng::from_entropy();
    let generator = Generator::default();
    let mut renderer = Renderer::new();
    let mut arena_no: u64 = 1;
    let (mut grid, mut stats) = generator.generate_with_stats(&mut rng);
    info!(arena = arena_no, attempts = stats.attempts, "generated arena");

    loop {
        let status = status_line(arena_no, &grid, &stats);
        renderer.render(stdout, terminal::size()?, &grid, &status)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    return Ok(());
                }
                arena_no += 1;
                (grid, stats) = generator.generate_with_stats(&mut rng);
                info!(arena = arena_no, attempts = stats.attempts, "generated arena");
            }
            Event::Resize(..) => renderer.invalidate(),
            _ => {}
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn status_line(arena_no: u64, grid: &Grid, stats: &GenerationStats) -> String {
    format!(
        "Arena {}  Tries: {}  Paths: {}  Blocks: {}  Power-ups: {}",
        arena_no,
        stats.attempts,
        grid.count(Tile::Path),
        grid.count(Tile::SoftBlock),
        grid.count(Tile::PowerUp)
    )
}
