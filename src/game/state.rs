use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Move one cell in a direction on a `size`x`size` torus.
    ///
    /// Each axis wraps on its own: stepping below 0 lands on `size - 1` and
    /// stepping past `size - 1` lands on 0. `self` must already be on the grid.
    pub fn wrapped_step(&self, direction: Direction, size: usize) -> Self {
        let last = size - 1;
        let Position { mut x, mut y } = *self;
        match direction {
            Direction::Up => y = if y == 0 { last } else { y - 1 },
            Direction::Down => y = if y == last { 0 } else { y + 1 },
            Direction::Left => x = if x == 0 { last } else { x - 1 },
            Direction::Right => x = if x == last { 0 } else { x + 1 },
        }
        Self { x, y }
    }
}

/// Lifecycle of one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Playing,
    Over,
}

/// The snake's body, head first.
///
/// Only the ordering lives here; which cells are occupied is answered by the
/// board, so pushing and popping stay O(1) at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Build a body from segments listed head first
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Self {
        Self {
            body: segments.into_iter().collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    pub(crate) fn clear(&mut self) {
        self.body.clear();
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
