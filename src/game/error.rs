use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Ignored input (same-axis turns, ticks outside a running game) is never an
/// error; those calls are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A coordinate outside the grid reached the board. Wrapped movement never
    /// produces one, so this points at an arithmetic bug.
    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfRange { x: usize, y: usize, size: usize },

    /// Apple placement found no empty cell.
    #[error("no empty cell left for an apple")]
    BoardFull,

    #[error("cell ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("invalid snake body: {0}")]
    InvalidSnake(String),
}
