//! Torus Snake - a deterministic Snake simulation on a wrapping grid
//!
//! This library provides:
//! - Core game logic: board, snake engine, direction rules (game module)
//! - A headless fixed-rate driver with start/pause/over handling (driver module)
//! - Per-process game statistics (metrics module)
//! - Execution modes: live play from stdin commands and scripted replay (modes module)

pub mod driver;
pub mod game;
pub mod metrics;
pub mod modes;
