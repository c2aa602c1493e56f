use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    food::FoodPlacer,
    geometry::{CellKind, Position},
    snake::Snake,
    state::GameState,
};

/// What a tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over (or the snake is empty); nothing changed
    Idle,
    /// Plain translation by one cell
    Moved,
    /// The snake grew onto the food and earned `points`
    Ate { points: u32 },
    /// The head would have left the grid; the game is over
    WallHit,
    /// The snake ate the last free cell; the game is over
    GridFull,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    /// Cells cut off by a self-bite earlier in the same tick
    pub bitten: Option<usize>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            outcome: TickOutcome::Idle,
            bitten: None,
        }
    }

    pub fn ended_game(&self) -> bool {
        matches!(self.outcome, TickOutcome::WallHit | TickOutcome::GridFull)
    }
}

/// Points for eating food on a cell of the given kind at the given speed
pub fn food_score(kind: CellKind, speed_ms: u64) -> u32 {
    let base = (1000 / speed_ms.max(1)) as u32;
    match kind {
        CellKind::Corner => base * 4,
        CellKind::Edge => base * 2,
        CellKind::Interior => base,
    }
}

/// Scale `score` by `new_len / old_len` after a self-bite
pub fn rescale_score(score: u32, new_len: usize, old_len: usize) -> u32 {
    if old_len == 0 {
        return score;
    }
    (u64::from(score) * new_len as u64 / old_len as u64) as u32
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    placer: FoodPlacer,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            placer: FoodPlacer::new(config.max_placement_attempts),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        let grid = self.config.grid();
        let snake = Snake::started();
        let food = self.placer.place(&mut self.rng, &snake, grid)?;

        Ok(GameState::new(snake, food, grid, self.config.initial_speed_ms))
    }

    /// Put `state` back to the start of a new game
    pub fn restart(&mut self, state: &mut GameState) -> Result<(), GameError> {
        *state = self.reset()?;
        info!("game restarted on a {0}x{0} grid", state.grid.size());
        Ok(())
    }

    /// Execute one tick with the snake heading `direction`
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepResult {
        if state.game_over {
            return StepResult::idle();
        }

        debug_assert!(!state.snake.is_empty(), "step on an empty snake");
        let Some(head) = state.snake.head() else {
            error!("step on an empty snake, skipping tick");
            return StepResult::idle();
        };

        state.snake.set_direction(direction);
        let next = head.step(direction);

        if !state.grid.contains(next) {
            state.game_over = true;
            state.info_dirty = true;
            info!(
                "snake hit the wall at ({}, {}), final score {}",
                next.x, next.y, state.score
            );
            return StepResult {
                outcome: TickOutcome::WallHit,
                bitten: None,
            };
        }

        let bitten = self.apply_bite(state, next);

        if next == state.food {
            return StepResult {
                outcome: self.eat(state, next),
                bitten,
            };
        }

        state.snake.advance(direction);
        StepResult {
            outcome: TickOutcome::Moved,
            bitten,
        }
    }

    /// Cut the body at `next` if the head bites into it, rescaling the score
    fn apply_bite(&self, state: &mut GameState, next: Position) -> Option<usize> {
        let before = state.snake.len();
        if !state.snake.cut_if_snake(next) {
            return None;
        }

        let new_len = state.snake.len();
        let old_score = state.score;
        state.score = rescale_score(state.score, new_len, state.snake.size());
        state.snake.set_size(new_len);
        state.info_dirty = true;
        debug!(
            "self-bite at ({}, {}): length {} -> {}, score {} -> {}",
            next.x, next.y, before, new_len, old_score, state.score
        );
        Some(before - new_len)
    }

    fn eat(&mut self, state: &mut GameState, next: Position) -> TickOutcome {
        state.snake.add(next);
        state.food_eaten += 1;
        state.snake.set_size(state.snake.size() + 1);
        state.speed_ms = state
            .speed_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.min_speed_ms);

        let points = food_score(state.grid.classify(next), state.speed_ms);
        state.score += points;
        state.info_dirty = true;
        debug!(
            "food eaten at ({}, {}) for {} points, speed now {}ms",
            next.x, next.y, points, state.speed_ms
        );

        match self.placer.place(&mut self.rng, &state.snake, state.grid) {
            Ok(food) => {
                state.food = food;
                TickOutcome::Ate { points }
            }
            Err(err) => {
                warn!("{err}; ending the game with score {}", state.score);
                state.game_over = true;
                TickOutcome::GridFull
            }
        }
    }
}
