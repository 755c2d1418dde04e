use std::str::FromStr;

use thiserror::Error;

use crate::game::Direction;

/// A request from whoever hosts the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Start or resume when idle, pause when playing
    Toggle,
    Restart,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "" => return Err(CommandError::Empty),

            "up" | "w" => Command::Turn(Direction::Up),
            "down" | "s" => Command::Turn(Direction::Down),
            "left" | "a" => Command::Turn(Direction::Left),
            "right" | "d" => Command::Turn(Direction::Right),

            "start" | "pause" | "resume" | "toggle" | "p" => Command::Toggle,
            "restart" | "new" | "r" => Command::Restart,
            "quit" | "exit" | "q" => Command::Quit,

            _ => return Err(CommandError::Unknown(s.trim().to_string())),
        };
        Ok(command)
    }
}
