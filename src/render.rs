//! Terminal drawing for generated arenas.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::grid::{Grid, Pos, Tile};

const CELL_W: usize = 2;
/// Rows used above (status) and below (prompt) the arena.
const CHROME_H: usize = 3;

pub const PROMPT: &str = "Press any key for a new arena, q to quit";

fn color_for(tile: Tile) -> Color {
    match tile {
        Tile::Wall => Color::DarkGrey,
        Tile::SoftBlock => Color::Yellow,
        Tile::Path => Color::Reset,
        Tile::PowerUp => Color::Magenta,
    }
}

/// Text drawn for one cell, always `CELL_W` columns wide.
fn cell_text(tile: Tile) -> String {
    let mut text = String::from(tile.glyph());
    if tile == Tile::Wall {
        text.push(tile.glyph());
    }
    while UnicodeWidthStr::width(text.as_str()) < CELL_W {
        text.push(' ');
    }
    text
}

pub struct Renderer {
    last: Option<Grid>,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: None,
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to redraw everything, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Draws `grid` centred in a terminal of `term` (cols, rows), with
    /// `status` above it and the key prompt below it. Only cells that changed
    /// since the previous frame are redrawn.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        term: (u16, u16),
        grid: &Grid,
        status: &str,
    ) -> io::Result<()> {
        let (term_w, term_h) = term;
        let needed_w = (grid.width() * CELL_W)
            .max(UnicodeWidthStr::width(status))
            .max(UnicodeWidthStr::width(PROMPT)) as u16;
        let needed_h = (grid.height() + CHROME_H) as u16;

        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let grid_w = (grid.width() * CELL_W) as u16;
        let origin_x = (term_w - grid_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self
            .last
            .as_ref()
            .map_or(true, |g| g.width() != grid.width() || g.height() != grid.height())
        {
            self.needs_full = true;
        }

        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
            let prompt_x = (term_w - UnicodeWidthStr::width(PROMPT) as u16) / 2;
            out.queue(MoveTo(prompt_x, origin_y + grid.height() as u16 + 1))?;
            out.queue(Print(PROMPT))?;
        }

        if self.needs_full || status != self.last_status {
            let status_x = (term_w - UnicodeWidthStr::width(status) as u16) / 2;
            out.queue(MoveTo(0, origin_y - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(MoveTo(status_x, origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Print(status))?;
            out.queue(ResetColor)?;
            self.last_status = status.to_string();
        }

        for pos in grid.positions() {
            let tile = grid.get(pos);
            let unchanged = !self.needs_full
                && self.last.as_ref().map(|g| g.get(pos)) == Some(tile);
            if !unchanged {
                self.draw_cell(out, pos, tile)?;
            }
        }
        self.last = Some(grid.clone());
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, pos: Pos, tile: Tile) -> io::Result<()> {
        let x = self.origin_x + (pos.x * CELL_W) as u16;
        let y = self.origin_y + pos.y as u16;
        out.queue(MoveTo(x, y))?;
        out.queue(SetForegroundColor(color_for(tile)))?;
        out.queue(Print(cell_text(tile)))?;
        out.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(renderer: &mut Renderer, term: (u16, u16), grid: &Grid, status: &str) -> String {
        let mut out = Vec::new();
        renderer.render(&mut out, term, grid, status).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cells_are_two_columns() {
        assert_eq!(cell_text(Tile::Wall), "##");
        assert_eq!(cell_text(Tile::Path), "  ");
        assert_eq!(cell_text(Tile::SoftBlock), "+ ");
        assert_eq!(cell_text(Tile::PowerUp), "* ");
    }

    #[test]
    fn first_frame_draws_everything() {
        let grid = Grid::from_rows(&["#####", "# +*#", "#####"]).unwrap();
        let mut renderer = Renderer::new();
        let text = frame(&mut renderer, (80, 24), &grid, "status");
        assert!(text.contains("status"));
        assert!(text.contains(PROMPT));
        assert_eq!(text.matches("##").count(), 12);
        assert!(text.contains("+ "));
        assert!(text.contains("* "));
    }

    #[test]
    fn unchanged_frame_draws_no_cells() {
        let grid = Grid::from_rows(&["#####", "# +*#", "#####"]).unwrap();
        let mut renderer = Renderer::new();
        frame(&mut renderer, (80, 24), &grid, "status");
        let text = frame(&mut renderer, (80, 24), &grid, "status");
        assert!(!text.contains("##"));
        assert!(!text.contains("status"));

        let mut changed = grid.clone();
        changed.set(Pos::new(1, 1), Tile::PowerUp);
        let text = frame(&mut renderer, (80, 24), &changed, "status");
        assert_eq!(text.matches("* ").count(), 1);
        assert!(!text.contains("##"));
    }

    #[test]
    fn small_terminal_shows_message() {
        let grid = Grid::default();
        let mut renderer = Renderer::new();
        let text = frame(&mut renderer, (10, 5), &grid, "status");
        assert!(text.contains("Terminal too small"));
        assert!(!text.contains("##"));
    }
}
