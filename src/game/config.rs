use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::GameError;
use super::geometry::Grid;
use super::snake::START_HEAD;

/// Largest grid that still fits a terminal
pub const MAX_GRID_SIZE: usize = 500;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Tick interval in milliseconds at the start of a game
    pub initial_speed_ms: u64,
    /// How much the tick interval shrinks per food eaten
    pub speed_step_ms: u64,
    /// The tick interval never drops below this
    pub min_speed_ms: u64,
    /// Random draws tried before food placement scans for free cells
    pub max_placement_attempts: usize,
    /// Seed for food placement; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_speed_ms: 300,
            speed_step_ms: 5,
            min_speed_ms: 50,
            max_placement_attempts: 64,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        // the starting snake must fit, with one free cell ahead of it
        let min_size = START_HEAD.x as usize + 2;
        if self.grid_size < min_size {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be at least {min_size}, got {}",
                self.grid_size
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.min_speed_ms == 0 {
            return Err(GameError::InvalidConfig(
                "min_speed_ms must be positive".to_string(),
            ));
        }
        if self.initial_speed_ms < self.min_speed_ms {
            return Err(GameError::InvalidConfig(format!(
                "initial_speed_ms ({}) is below min_speed_ms ({})",
                self.initial_speed_ms, self.min_speed_ms
            )));
        }
        Ok(())
    }
}
