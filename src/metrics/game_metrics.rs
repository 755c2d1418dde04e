use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Statistics for the current process. Nothing here outlives it.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    /// Ticks taken in the current game
    pub ticks: u64,
    /// Apples eaten in the current game
    pub apples_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            ticks: 0,
            apples_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.apples_eaten = 0;
    }

    pub fn on_tick(&mut self, outcome: &TickOutcome) {
        match outcome {
            TickOutcome::Idle => return,
            TickOutcome::Ate { .. } => self.apples_eaten += 1,
            TickOutcome::Moved { .. } | TickOutcome::Collided { .. } => {}
        }
        self.ticks += 1;
    }

    /// The last apple was eaten and no cell is left for another
    pub fn on_board_filled(&mut self) {
        self.ticks += 1;
        self.apples_eaten += 1;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
