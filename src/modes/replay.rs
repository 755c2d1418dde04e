//! Replay mode: play a scripted list of turns against a seeded engine
//!
//! No timers are involved, so the same script always produces the same
//! [`Summary`]. A script is a JSON document:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "max_ticks": 40,
//!   "config": { "map_size": 20 },
//!   "intents": [
//!     { "tick": 3, "direction": "up" },
//!     { "tick": 6, "direction": "left" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::{Direction, GameConfig, GameError, Position, SnakeEngine};

/// A turn requested right before a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub tick: u64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: GameConfig,
    pub seed: u64,
    pub max_ticks: u64,
    #[serde(default)]
    pub intents: Vec<Intent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// End state of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ticks: u64,
    pub over: bool,
    pub score: u32,
    pub length: usize,
    pub head: Option<Position>,
    pub direction: Direction,
    pub apple: Option<Position>,
}

pub struct ReplayMode {
    script: Script,
}

impl ReplayMode {
    pub fn new(script: Script) -> Self {
        Self { script }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Run the script to its tick budget or to game over, whichever is first.
    ///
    /// Only the first accepted intent of each tick takes effect.
    pub fn run(&self) -> Result<Summary, GameError> {
        let script = &self.script;
        let mut engine = SnakeEngine::seeded(script.config.clone(), script.seed)?;
        engine.new_game()?;

        let mut ticks = 0;
        while ticks < script.max_ticks && !engine.is_over() {
            // first accepted turn wins; a second one could reach the neck
            let _ = script
                .intents
                .iter()
                .filter(|i| i.tick == ticks)
                .any(|i| engine.set_direction(i.direction));

            match engine.tick() {
                // a snake filling the board ends the game
                Ok(_) | Err(GameError::BoardFull) => {}
                Err(err) => return Err(err),
            }
            ticks += 1;
        }

        let summary = Summary {
            ticks,
            over: engine.is_over(),
            score: engine.score(),
            length: engine.snake().len(),
            head: engine.snake().head(),
            direction: engine.direction(),
            apple: engine.board().apple(),
        };
        info!(ticks, score = summary.score, over = summary.over, "replay finished");
        Ok(summary)
    }
}
