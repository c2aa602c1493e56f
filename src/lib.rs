//! Grid snake - a classic snake arcade game
//!
//! This library provides:
//! - The deterministic simulation core (game module)
//! - Keyboard translation (input module)
//! - TUI rendering (render module) and session metrics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
