//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timer or
//! rendering dependencies. Drivers own the cadence and call into
//! [`SnakeEngine`] one tick at a time.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction};
pub use board::{Board, Content};
pub use config::{GameConfig, MAX_MAP_SIZE};
pub use engine::{ScoreListener, SnakeEngine, TickOutcome};
pub use error::GameError;
pub use state::{Phase, Position, Snake};
