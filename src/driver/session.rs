//! The host side of a game: start/pause/over status, frame pacing and
//! direction gating around a [`SnakeEngine`].

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::command::Command;
use crate::game::{Direction, GameError, Position, SnakeEngine, TickOutcome};
use crate::metrics::GameMetrics;

/// Frame rate of the driving loop and how many frames make one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub frames_per_second: u32,
    pub frames_per_tick: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            frames_per_tick: 25,
        }
    }
}

impl Pacing {
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }

    pub fn tick_period(&self) -> Duration {
        self.frame_period() * self.frames_per_tick.max(1)
    }
}

/// Where the host is in the game's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// A fresh game is laid out and waiting to be started
    Start,
    Playing,
    Paused,
    Over,
}

/// What a session looked like when it ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub status: Status,
    pub score: u32,
    pub length: usize,
    pub head: Option<Position>,
    pub direction: Direction,
    pub ticks: u64,
    pub apples_eaten: u32,
    pub games_played: u32,
    pub best_score: u32,
    pub elapsed: String,
}

pub struct Session<R = StdRng> {
    engine: SnakeEngine<R>,
    pacing: Pacing,
    status: Status,
    frame: u64,
    /// A turn was accepted since the last tick
    turned: bool,
    metrics: GameMetrics,
}

impl<R: Rng> Session<R> {
    /// Lay out a new game and wait for it to be started
    pub fn new(mut engine: SnakeEngine<R>, pacing: Pacing) -> Result<Self, GameError> {
        engine.new_game()?;
        Ok(Self {
            engine,
            pacing,
            status: Status::Start,
            frame: 0,
            turned: false,
            metrics: GameMetrics::new(),
        })
    }

    /// Wrap an engine that is already mid-game and let it play on
    #[cfg(test)]
    pub(crate) fn in_play(engine: SnakeEngine<R>, pacing: Pacing) -> Self {
        Self {
            engine,
            pacing,
            status: Status::Playing,
            frame: 0,
            turned: false,
            metrics: GameMetrics::new(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn engine(&self) -> &SnakeEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SnakeEngine<R> {
        &mut self.engine
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Frames counted since the game was last started or resumed
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply a command. Returns `false` once the host asked to quit.
    pub fn apply(&mut self, command: Command) -> Result<bool, GameError> {
        match command {
            Command::Turn(direction) => {
                self.turn(direction);
            }
            Command::Toggle => self.toggle()?,
            Command::Restart => self.restart()?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Forward a direction intent, but only while the game is running and
    /// no other turn was accepted since the last tick. A second turn before
    /// the snake moves could fold the head back onto its neck.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.status != Status::Playing || self.turned {
            return false;
        }
        let changed = self.engine.set_direction(direction);
        self.turned = changed;
        debug!(?direction, changed, "turn");
        changed
    }

    /// Pause a running game; start or resume anything else. Leaving the
    /// game-over screen starts a new game.
    pub fn toggle(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::Playing => {
                self.status = Status::Paused;
                info!("paused");
            }
            Status::Over => {
                self.new_game()?;
                self.resume();
            }
            Status::Start | Status::Paused => self.resume(),
        }
        Ok(())
    }

    /// Throw the current game away and lay out a new one
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.new_game()?;
        self.status = Status::Start;
        Ok(())
    }

    fn new_game(&mut self) -> Result<(), GameError> {
        self.engine.new_game()?;
        self.metrics.on_game_start();
        self.frame = 0;
        self.turned = false;
        Ok(())
    }

    fn resume(&mut self) {
        self.status = Status::Playing;
        self.frame = 0;
        info!("playing");
    }

    /// Count one frame, ticking the engine on every `frames_per_tick`-th
    /// frame starting with the first. Does nothing unless playing.
    ///
    /// Returns the outcome of the tick, if one ran. A snake that fills the
    /// whole board ends the game like a collision does; that tick reports
    /// no outcome since no new apple exists.
    pub fn advance_frame(&mut self) -> Result<Option<TickOutcome>, GameError> {
        if self.status != Status::Playing {
            return Ok(None);
        }

        let due = self.frame % u64::from(self.pacing.frames_per_tick.max(1)) == 0;
        self.frame += 1;
        if !due {
            return Ok(None);
        }

        self.turned = false;
        let outcome = match self.engine.tick() {
            Ok(outcome) => {
                self.metrics.on_tick(&outcome);
                Some(outcome)
            }
            Err(GameError::BoardFull) => {
                self.metrics.on_board_filled();
                info!(score = self.engine.score(), "snake fills the board");
                None
            }
            Err(err) => return Err(err),
        };
        if self.engine.is_over() {
            self.status = Status::Over;
            self.metrics.on_game_over(self.engine.score());
        }
        Ok(outcome)
    }

    pub fn report(&mut self) -> SessionReport {
        self.metrics.update();
        let snake = self.engine.snake();
        SessionReport {
            status: self.status,
            score: self.engine.score(),
            length: snake.len(),
            head: snake.head(),
            direction: self.engine.direction(),
            ticks: self.metrics.ticks,
            apples_eaten: self.metrics.apples_eaten,
            games_played: self.metrics.games_played,
            best_score: self.metrics.best_score,
            elapsed: self.metrics.format_time(),
        }
    }
}
