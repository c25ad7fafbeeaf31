//! Reachability checks over open tiles.
//!
//! Only `Tile::Path` is walkable here. Soft blocks and power-ups are
//! obstacles, same as walls.

use std::collections::VecDeque;

use crate::grid::{Grid, Pos};

/// Visited mask produced by a flood from one start cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    width: usize,
    seen: Vec<bool>,
}

impl Reachability {
    pub fn contains(&self, pos: Pos) -> bool {
        self.seen[pos.y * self.width + pos.x]
    }

    pub fn len(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First open cell in row-major order.
pub fn first_open(grid: &Grid) -> Option<Pos> {
    grid.positions().find(|&pos| grid.get(pos).is_open())
}

/// Breadth-first flood over 4-neighbours from `start`.
pub fn reachable(grid: &Grid, start: Pos) -> Reachability {
    let width = grid.width();
    let mut seen = vec![false; width * grid.height()];
    let mut q = VecDeque::new();
    if grid.get(start).is_open() {
        seen[start.y * width + start.x] = true;
        q.push_back(start);
    }
    while let Some(pos) = q.pop_front() {
        for npos in grid.von_neumann(pos) {
            let idx = npos.y * width + npos.x;
            if seen[idx] || !grid.get(npos).is_open() {
                continue;
            }
            seen[idx] = true;
            q.push_back(npos);
        }
    }
    Reachability { width, seen }
}

fn has_unreachable(grid: &Grid, reach: &Reachability) -> bool {
    grid.positions()
        .any(|pos| grid.get(pos).is_open() && !reach.contains(pos))
}

/// True when every open cell can reach every other one. A grid with no open
/// cells is trivially connected.
pub fn is_fully_connected(grid: &Grid) -> bool {
    match first_open(grid) {
        None => true,
        Some(start) => !has_unreachable(grid, &reachable(grid, start)),
    }
}

/// Number of separate open regions.
pub fn regions(grid: &Grid) -> usize {
    let mut claimed = vec![false; grid.width() * grid.height()];
    let mut count = 0;
    for pos in grid.positions() {
        let idx = pos.y * grid.width() + pos.x;
        if claimed[idx] || !grid.get(pos).is_open() {
            continue;
        }
        count += 1;
        let reach = reachable(grid, pos);
        for (slot, seen) in claimed.iter_mut().zip(reach.seen) {
            *slot |= seen;
        }
    }
    count
}
