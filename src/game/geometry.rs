use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
///
/// The y axis points up: `Direction::Up` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell one unit away in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Where a cell sits relative to the border of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Corner,
    Edge,
    Interior,
}

/// Square playing field of `size` x `size` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size.saturating_mul(self.size)
    }

    /// Side length as a coordinate bound, clamped to `i32::MAX`
    pub fn side(&self) -> i32 {
        i32::try_from(self.size).unwrap_or(i32::MAX)
    }

    fn last(&self) -> i32 {
        self.side() - 1
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        let last = self.last();
        (0..=last).contains(&pos.x) && (0..=last).contains(&pos.y)
    }

    /// Both coordinates lie on the border
    pub fn is_corner(&self, pos: Position) -> bool {
        let last = self.last();
        (pos.x == 0 || pos.x == last) && (pos.y == 0 || pos.y == last)
    }

    /// At least one coordinate lies on the border (corners included)
    pub fn is_edge(&self, pos: Position) -> bool {
        let last = self.last();
        pos.x == 0 || pos.x == last || pos.y == 0 || pos.y == last
    }

    pub fn classify(&self, pos: Position) -> CellKind {
        if self.is_corner(pos) {
            CellKind::Corner
        } else if self.is_edge(pos) {
            CellKind::Edge
        } else {
            CellKind::Interior
        }
    }

    /// Every cell, row by row starting at y = 0
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.side();
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }
}
