use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Every cell is covered by the snake, so food has nowhere to go.
    #[error("no free cell left for food on the grid")]
    GridFull,
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
