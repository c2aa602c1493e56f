use log::error;

use super::direction::Direction;
use super::geometry::Position;

/// Head cell of a freshly reset snake
pub const START_HEAD: Position = Position { x: 3, y: 1 };
/// Number of cells a freshly reset snake has
pub const START_LENGTH: usize = 3;

/// The snake in the game
///
/// `size` tracks the length the score is measured against. It normally
/// equals `body.len()`, but a self-bite shrinks the body first and the game
/// loop updates `size` afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    size: usize,
    direction: Direction,
}

impl Snake {
    /// An empty snake; call [`Snake::reset`] before playing
    pub fn new() -> Self {
        Self::default()
    }

    /// A snake in its starting pose
    pub fn started() -> Self {
        let mut snake = Self::new();
        snake.reset();
        snake
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(cells: Vec<Position>, direction: Direction) -> Self {
        Self {
            size: cells.len(),
            body: cells,
            direction,
        }
    }

    /// Back to the three-cell horizontal segment on row 1, heading right
    pub fn reset(&mut self) {
        self.body.clear();
        self.direction = Direction::Right;
        for i in 0..START_LENGTH as i32 {
            self.body.push(START_HEAD.moved_by(-i, 0));
        }
        self.size = START_LENGTH;
    }

    /// Prepend a new head cell
    pub fn add(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Shift the body one cell towards `direction`, dropping the old tail
    pub fn advance(&mut self, direction: Direction) {
        debug_assert!(!self.is_empty(), "advance called on an empty snake");
        let Some(head) = self.head() else {
            error!("advance called on an empty snake");
            return;
        };

        self.body.rotate_right(1);
        self.body[0] = head.step(direction);
        self.direction = direction;
    }

    /// Check if position is any body cell, head included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// If `pos` is on the body, cut the body just before it.
    ///
    /// The matching cell and everything behind it are dropped. Returns
    /// whether a cut happened.
    pub fn cut_if_snake(&mut self, pos: Position) -> bool {
        match self.body.iter().position(|&cell| cell == pos) {
            Some(index) => {
                self.body.truncate(index);
                true
            }
            None => false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
