use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Largest accepted grid side; the board allocates `map_size²` cells
pub const MAX_MAP_SIZE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square, wrapping grid
    pub map_size: usize,
    /// Column of the tail segment at game start
    pub start_x: usize,
    /// Row the snake starts on
    pub start_y: usize,
    /// Initial length of the snake; score counts growth past it
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: 20,
            start_x: 5,
            start_y: 10,
            initial_length: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    ///
    /// The starting row is kept in the middle of the grid and the tail column
    /// is clamped so the initial snake still fits.
    pub fn new(map_size: usize) -> Self {
        let defaults = Self::default();
        let start_x = defaults
            .start_x
            .min(map_size.saturating_sub(defaults.initial_length));
        Self {
            map_size,
            start_x,
            start_y: map_size / 2,
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.map_size == 0 {
            return Err(GameError::InvalidConfig("map_size must be positive".into()));
        }
        if self.map_size > MAX_MAP_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "map_size {} exceeds the maximum of {MAX_MAP_SIZE}",
                self.map_size
            )));
        }
        if self.initial_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial_length must be at least 1".into(),
            ));
        }
        if self.start_y >= self.map_size {
            return Err(GameError::InvalidConfig(format!(
                "start_y {} is outside a map of size {}",
                self.start_y, self.map_size
            )));
        }
        if self.start_x + self.initial_length > self.map_size {
            return Err(GameError::InvalidConfig(format!(
                "a snake of length {} starting at x={} does not fit a map of size {}",
                self.initial_length, self.start_x, self.map_size
            )));
        }
        Ok(())
    }
}
