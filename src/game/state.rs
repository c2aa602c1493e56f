use serde::Serialize;

use super::direction::Direction;
use super::geometry::{Grid, Position};
use super::snake::Snake;

/// Complete game state, owned by the simulation loop
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid: Grid,
    pub score: u32,
    pub food_eaten: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub game_over: bool,
    /// Score, food count, speed or game-over changed since the last snapshot
    pub info_dirty: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid: Grid, speed_ms: u64) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            food_eaten: 0,
            speed_ms,
            game_over: false,
            info_dirty: true,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.game_over
    }
}

/// Read-only view of the game handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub body: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub grid_size: usize,
    pub score: u32,
    pub food_eaten: u32,
    pub speed_ms: u64,
    /// How far the tick interval has dropped from its starting value
    pub difficulty: u64,
    pub game_over: bool,
    /// Bumped whenever score, food count, speed or game-over changed
    pub info_version: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState, initial_speed_ms: u64, info_version: u64) -> Self {
        Self {
            body: state.snake.body().to_vec(),
            food: state.food,
            direction: state.snake.direction(),
            grid_size: state.grid.size(),
            score: state.score,
            food_eaten: state.food_eaten,
            speed_ms: state.speed_ms,
            difficulty: initial_speed_ms.saturating_sub(state.speed_ms),
            game_over: state.game_over,
            info_version,
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    /// Whether the static info panel needs redrawing for a renderer that last
    /// drew `seen_version`
    pub fn info_changed_since(&self, seen_version: u64) -> bool {
        self.info_version != seen_version
    }
}
