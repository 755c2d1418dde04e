use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::state::Position;

/// What a single cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    #[default]
    Empty,
    Snake,
    Apple,
}

/// Square grid of cell contents, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Content>,
}

impl Board {
    /// Create an all-empty `size`x`size` board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Content::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Mark every cell Empty
    pub fn reset(&mut self) {
        self.cells.fill(Content::Empty);
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GameError> {
        if x >= self.size || y >= self.size {
            return Err(GameError::OutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y * self.size + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Content, GameError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, content: Content) -> Result<(), GameError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = content;
        Ok(())
    }

    pub fn content_at(&self, pos: Position) -> Result<Content, GameError> {
        self.get(pos.x, pos.y)
    }

    pub fn set_at(&mut self, pos: Position, content: Content) -> Result<(), GameError> {
        self.set(pos.x, pos.y, content)
    }

    /// Put an apple on a uniformly chosen empty cell.
    ///
    /// Candidates are collected up front so a full board is reported as
    /// [`GameError::BoardFull`] instead of sampling forever.
    pub fn place_apple_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, content)| **content == Content::Empty)
            .map(|(idx, _)| idx)
            .collect();

        let idx = *empty.choose(rng).ok_or(GameError::BoardFull)?;
        self.cells[idx] = Content::Apple;
        Ok(Position::new(idx % self.size, idx / self.size))
    }

    /// Number of cells holding `content`
    pub fn count(&self, content: Content) -> usize {
        self.cells.iter().filter(|c| **c == content).count()
    }

    /// Position of the first apple in row-major order
    pub fn apple(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| *c == Content::Apple)
            .map(|idx| Position::new(idx % self.size, idx / self.size))
    }

    /// Rows from top to bottom, for painting
    pub fn rows(&self) -> impl Iterator<Item = &[Content]> + '_ {
        // chunks(0) panics, and a zero-sized board has no rows anyway
        self.cells.chunks(self.size.max(1))
    }
}
