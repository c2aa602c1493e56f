use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::GameError;
use super::geometry::{Grid, Position};
use super::snake::Snake;

/// Picks the cell for the next piece of food
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    max_attempts: usize,
}

impl FoodPlacer {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Choose a random cell that is not on the snake.
    ///
    /// Draws uniformly from the whole grid up to `max_attempts` times. When
    /// the snake covers so much of the grid that every draw lands on it, picks
    /// uniformly among the remaining free cells instead.
    pub fn place<R: Rng>(
        &self,
        rng: &mut R,
        snake: &Snake,
        grid: Grid,
    ) -> Result<Position, GameError> {
        let size = grid.side();
        if size <= 0 {
            return Err(GameError::GridFull);
        }

        for _ in 0..self.max_attempts {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if !snake.contains(pos) {
                return Ok(pos);
            }
        }

        debug!(
            "food sampling missed {} times, scanning free cells",
            self.max_attempts
        );
        grid.cells()
            .filter(|&pos| !snake.contains(pos))
            .choose(rng)
            .ok_or(GameError::GridFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Snake covering every cell of `grid` except those in `free`
    fn snake_filling(grid: Grid, free: &[Position]) -> Snake {
        let cells = grid.cells().filter(|p| !free.contains(p)).collect();
        Snake::from_cells(cells, Direction::Right)
    }

    #[test]
    fn test_food_never_on_snake() {
        let grid = Grid::new(20);
        let snake = Snake::started();
        let placer = FoodPlacer::new(64);

        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let food = placer.place(&mut rng, &snake, grid).unwrap();
            assert!(grid.contains(food));
            assert!(!snake.contains(food));
        }
    }

    #[test]
    fn test_nearly_full_grid_finds_last_cell() {
        let grid = Grid::new(6);
        let hole = Position::new(4, 2);
        let snake = snake_filling(grid, &[hole]);
        let placer = FoodPlacer::new(1);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(placer.place(&mut rng, &snake, grid), Ok(hole));
        }
    }

    #[test]
    fn test_zero_attempts_still_places() {
        let grid = Grid::new(8);
        let snake = Snake::started();
        let mut rng = StdRng::seed_from_u64(3);

        let food = FoodPlacer::new(0).place(&mut rng, &snake, grid).unwrap();
        assert!(!snake.contains(food));
    }

    #[test]
    fn test_full_grid_is_an_error() {
        let grid = Grid::new(5);
        let snake = snake_filling(grid, &[]);
        let mut rng = StdRng::seed_from_u64(0);

        let result = FoodPlacer::new(64).place(&mut rng, &snake, grid);
        assert_eq!(result, Err(GameError::GridFull));
    }
}
