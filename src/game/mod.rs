//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The only asynchronous piece is [`Simulation`], which drives the engine from a tokio timer.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod geometry;
pub mod simulation;
pub mod snake;
pub mod state;
pub mod steering;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{food_score, GameEngine, StepResult, TickOutcome};
pub use error::GameError;
pub use food::FoodPlacer;
pub use geometry::{CellKind, Grid, Position};
pub use simulation::{Command, GameHandle, Simulation};
pub use snake::Snake;
pub use state::{GameState, Snapshot};
pub use steering::Steering;
