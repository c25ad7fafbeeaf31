use std::fmt;

use thiserror::Error;

/// Default arena width in tiles.
pub const ARENA_WIDTH: usize = 15;
/// Default arena height in tiles.
pub const ARENA_HEIGHT: usize = 8;

static MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

static VON_NEUMANN: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    SoftBlock,
    Path,
    PowerUp,
}

impl Tile {
    /// Character used when the arena is printed.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::SoftBlock => '+',
            Tile::Path => ' ',
            Tile::PowerUp => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Tile> {
        match glyph {
            '#' => Some(Tile::Wall),
            '+' => Some(Tile::SoftBlock),
            ' ' => Some(Tile::Path),
            '*' => Some(Tile::PowerUp),
            _ => None,
        }
    }

    /// Only plain paths count as open for reachability.
    pub fn is_open(self) -> bool {
        self == Tile::Path
    }
}

/// A cell coordinate. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: isize, dy: isize) -> Option<Pos> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("no rows given")]
    Empty,
    #[error("grid of {width}x{height} has no interior")]
    TooSmall { width: usize, height: usize },
    #[error("row {row} has a different width than row 0")]
    Ragged { row: usize },
    #[error("unknown glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Rectangular tile buffer. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with walls.
    ///
    /// Panics if either dimension is below 3, since such a grid has no
    /// interior.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 3 && height >= 3,
            "grid must be at least 3x3, got {width}x{height}"
        );
        Self {
            width,
            height,
            cells: vec![Tile::Wall; width * height],
        }
    }

    /// Builds a grid from glyph rows. Used for fixtures.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridParseError> {
        let first = rows.first().ok_or(GridParseError::Empty)?;
        let width = first.chars().count();
        if width < 3 || rows.len() < 3 {
            return Err(GridParseError::TooSmall {
                width,
                height: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GridParseError::Ragged { row });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile = Tile::from_glyph(glyph)
                    .ok_or(GridParseError::UnknownGlyph { glyph, row, col })?;
                cells.push(tile);
            }
        }
        let mut grid = Grid::new(width, rows.len());
        grid.cells = cells;
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "position ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y * self.width + pos.x
    }

    pub fn get(&self, pos: Pos) -> Tile {
        self.cells[self.index(pos)]
    }

    pub fn try_get(&self, pos: Pos) -> Option<Tile> {
        self.contains(pos).then(|| self.cells[pos.y * self.width + pos.x])
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        let idx = self.index(pos);
        self.cells[idx] = tile;
    }

    /// All coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Pos { x, y }))
    }

    /// Coordinates excluding the border ring, row-major.
    pub fn interior(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;
        (1..self.height - 1).flat_map(move |y| (1..width - 1).map(move |x| Pos { x, y }))
    }

    /// Counts the 8 surrounding cells that satisfy `pred`. Cells off the
    /// grid are skipped.
    pub fn moore_count(&self, pos: Pos, pred: impl Fn(Tile) -> bool) -> usize {
        MOORE
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter_map(|p| self.try_get(p))
            .filter(|&tile| pred(tile))
            .count()
    }

    /// In-bounds up/down/left/right neighbours.
    pub fn von_neumann(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        VON_NEUMANN
            .iter()
            .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |&p| self.contains(p))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|t| t.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
