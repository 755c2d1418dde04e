use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::Direction,
    board::{Board, Content},
    config::GameConfig,
    error::GameError,
    state::{Phase, Position, Snake},
};

/// Receives the score every time it changes
pub trait ScoreListener {
    fn on_score_updated(&mut self, score: u32);
}

impl<F: FnMut(u32)> ScoreListener for F {
    fn on_score_updated(&mut self, score: u32) {
        self(score)
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is not playing; nothing changed
    Idle,
    /// The snake moved into an empty cell
    Moved { head: Position },
    /// The snake ate the apple, grew by one and a new apple was placed
    Ate {
        head: Position,
        apple: Position,
        score: u32,
    },
    /// The next cell held the snake itself; the game is over and the move
    /// was not applied
    Collided { at: Position },
}

/// The game engine that handles all game logic
///
/// Owns the board, the snake body and the current direction. It holds no
/// timer state: a driver calls [`SnakeEngine::tick`] at whatever cadence it
/// likes, and must not call into the engine concurrently.
pub struct SnakeEngine<R = StdRng> {
    config: GameConfig,
    board: Board,
    snake: Snake,
    direction: Direction,
    phase: Phase,
    rng: R,
    listener: Option<Box<dyn ScoreListener + Send>>,
}

impl SnakeEngine<StdRng> {
    /// Create an engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose apple placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SnakeEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.map_size),
            config,
            snake: Snake::default(),
            direction: Direction::Right,
            phase: Phase::NotStarted,
            rng,
            listener: None,
        })
    }

    /// Build a running game from an explicit body, listed head first.
    ///
    /// One apple is placed on a random empty cell. Fails if the body is
    /// empty, leaves the grid or visits a cell twice.
    pub fn with_snake(
        config: GameConfig,
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        rng: R,
    ) -> Result<Self, GameError> {
        let mut engine = Self::with_rng(config, rng)?;
        let snake = Snake::from_segments(segments);
        if snake.is_empty() {
            return Err(GameError::InvalidSnake("body has no segments".into()));
        }

        for pos in snake.segments() {
            let content = engine.board.content_at(pos).map_err(|_| {
                GameError::InvalidSnake(format!("segment ({}, {}) is off the board", pos.x, pos.y))
            })?;
            if content == Content::Snake {
                return Err(GameError::InvalidSnake(format!(
                    "segment ({}, {}) appears twice",
                    pos.x, pos.y
                )));
            }
            engine.board.set_at(pos, Content::Snake)?;
        }

        engine.snake = snake;
        engine.direction = direction;
        engine.board.place_apple_randomly(&mut engine.rng)?;
        engine.phase = Phase::Playing;
        Ok(engine)
    }

    /// Register the observer notified on every score change
    pub fn set_score_listener(&mut self, listener: impl ScoreListener + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Reset to a fresh game: snake laid out horizontally with its head on
    /// the right, heading right, plus one apple.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.board.reset();
        self.snake.clear();

        for i in 0..self.config.initial_length {
            let pos = Position::new(self.config.start_x + i, self.config.start_y);
            self.board.set_at(pos, Content::Snake)?;
            self.snake.push_head(pos);
        }

        self.direction = Direction::Right;
        self.phase = Phase::Playing;
        let apple = self.board.place_apple_randomly(&mut self.rng)?;

        info!(
            head = ?self.snake.head(),
            ?apple,
            "new game"
        );
        self.notify_score();
        Ok(())
    }

    /// Turn onto the other axis.
    ///
    /// Requests on the current axis, including the current direction itself,
    /// are ignored so the snake can never fold back onto its neck. Returns
    /// whether the direction changed.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.shares_axis(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance the snake by one cell
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Ok(TickOutcome::Idle);
        }

        let head = self
            .snake
            .head()
            .ok_or_else(|| GameError::InvalidSnake("playing without a body".into()))?;
        let next = head.wrapped_step(self.direction, self.board.size());
        let content = self.board.content_at(next)?;
        debug!(?head, ?next, ?content, "tick");

        match content {
            Content::Empty => {
                self.board.set_at(next, Content::Snake)?;
                self.snake.push_head(next);
                if let Some(tail) = self.snake.pop_tail() {
                    self.board.set_at(tail, Content::Empty)?;
                }
                Ok(TickOutcome::Moved { head: next })
            }
            Content::Apple => {
                self.board.set_at(next, Content::Snake)?;
                self.snake.push_head(next);

                let apple = match self.board.place_apple_randomly(&mut self.rng) {
                    Ok(apple) => apple,
                    Err(err) => {
                        // The snake fills the whole board; nothing left to play for.
                        self.phase = Phase::Over;
                        self.notify_score();
                        return Err(err);
                    }
                };

                let score = self.score();
                info!(score, length = self.snake.len(), ?apple, "apple eaten");
                self.notify_score();
                Ok(TickOutcome::Ate {
                    head: next,
                    apple,
                    score,
                })
            }
            Content::Snake => {
                self.phase = Phase::Over;
                info!(at = ?next, score = self.score(), "game over");
                Ok(TickOutcome::Collided { at: next })
            }
        }
    }

    /// Move the current apple onto `pos`, which must not hold the snake.
    ///
    /// Meant for setting up scripted positions; regular play only places
    /// apples at random.
    pub fn relocate_apple(&mut self, pos: Position) -> Result<(), GameError> {
        match self.board.content_at(pos)? {
            Content::Apple => return Ok(()),
            Content::Snake => return Err(GameError::CellOccupied { x: pos.x, y: pos.y }),
            Content::Empty => {}
        }
        if let Some(old) = self.board.apple() {
            self.board.set_at(old, Content::Empty)?;
        }
        self.board.set_at(pos, Content::Apple)
    }

    fn notify_score(&mut self) {
        let score = self.score();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_score_updated(score);
        }
    }

    /// Growth since the start of the game; never negative
    pub fn score(&self) -> u32 {
        self.snake.len().saturating_sub(self.config.initial_length) as u32
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn started(seed: u64) -> SnakeEngine {
        let mut engine = SnakeEngine::seeded(GameConfig::default(), seed).unwrap();
        engine.new_game().unwrap();
        engine
    }

    fn body(engine: &SnakeEngine) -> Vec<Position> {
        engine.snake().segments().collect()
    }

    #[test]
    fn test_fresh_engine_is_not_started() {
        let mut engine = SnakeEngine::seeded(GameConfig::default(), 1).unwrap();
        assert_eq!(engine.phase(), Phase::NotStarted);
        assert_eq!(engine.tick(), Ok(TickOutcome::Idle));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.board().count(Content::Empty), 400);
    }

    #[test]
    fn test_new_game_layout() {
        let engine = started(1);

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(
            body(&engine),
            vec![
                Position::new(7, 10),
                Position::new(6, 10),
                Position::new(5, 10)
            ]
        );
        assert_eq!(engine.board().count(Content::Snake), 3);
        assert_eq!(engine.board().count(Content::Apple), 1);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = started(3);
        engine.relocate_apple(Position::new(0, 0)).unwrap();

        let outcome = engine.tick().unwrap();

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                head: Position::new(8, 10)
            }
        );
        assert_eq!(engine.snake().len(), 3);
        assert_eq!(engine.snake().tail(), Some(Position::new(6, 10)));
        assert_eq!(engine.board().get(5, 10), Ok(Content::Empty));
        assert_eq!(engine.board().get(8, 10), Ok(Content::Snake));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = started(5);
        engine.relocate_apple(Position::new(8, 10)).unwrap();
        let empty_before = engine.board().count(Content::Empty);

        let outcome = engine.tick().unwrap();

        let TickOutcome::Ate { head, apple, score } = outcome else {
            panic!("expected the apple to be eaten, got {outcome:?}");
        };
        assert_eq!(head, Position::new(8, 10));
        assert_ne!(apple, head);
        assert_eq!(score, 1);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.snake().tail(), Some(Position::new(5, 10)));
        assert_eq!(engine.board().content_at(apple), Ok(Content::Apple));
        assert_eq!(engine.board().count(Content::Apple), 1);
        assert_eq!(engine.board().count(Content::Empty), empty_before - 1);
    }

    #[test]
    fn test_wraps_right_edge() {
        let mut engine = SnakeEngine::with_snake(
            GameConfig::default(),
            [
                Position::new(19, 10),
                Position::new(18, 10),
                Position::new(17, 10),
            ],
            Direction::Right,
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        engine.relocate_apple(Position::new(0, 0)).unwrap();

        engine.tick().unwrap();

        assert_eq!(engine.snake().head(), Some(Position::new(0, 10)));
        assert!(!engine.is_over());
    }

    #[test]
    fn test_axis_rule() {
        let mut engine = started(1);

        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Right);
        assert!(!engine.set_direction(Direction::Right));
        assert_eq!(engine.direction(), Direction::Right);

        assert!(engine.set_direction(Direction::Up));
        assert_eq!(engine.direction(), Direction::Up);
        assert!(!engine.set_direction(Direction::Down));
        assert_eq!(engine.direction(), Direction::Up);
        assert!(engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Left);
    }

    #[test]
    fn test_direction_accepted_before_start() {
        let mut engine = SnakeEngine::seeded(GameConfig::default(), 1).unwrap();
        assert!(engine.set_direction(Direction::Down));
        // new_game always restarts heading right
        engine.new_game().unwrap();
        assert_eq!(engine.direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) with the neck below it; moving right hits segment 3.
        let segments = [
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(7, 5),
        ];
        let mut engine = SnakeEngine::with_snake(
            GameConfig::default(),
            segments,
            Direction::Right,
            StdRng::seed_from_u64(2),
        )
        .unwrap();
        let board_before = engine.board().clone();

        let outcome = engine.tick().unwrap();

        assert_eq!(
            outcome,
            TickOutcome::Collided {
                at: Position::new(6, 5)
            }
        );
        assert!(engine.is_over());
        assert_eq!(engine.snake().len(), 5);
        assert_eq!(body(&engine), segments.to_vec());
        assert_eq!(engine.board(), &board_before);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut engine = SnakeEngine::with_snake(
            GameConfig::default(),
            [
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Right,
            StdRng::seed_from_u64(2),
        )
        .unwrap();

        assert!(matches!(engine.tick(), Ok(TickOutcome::Collided { .. })));
        assert_eq!(engine.snake().len(), 4);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = SnakeEngine::with_snake(
            GameConfig::default(),
            [
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Right,
            StdRng::seed_from_u64(2),
        )
        .unwrap();
        engine.tick().unwrap();
        let board_before = engine.board().clone();

        assert_eq!(engine.tick(), Ok(TickOutcome::Idle));
        assert_eq!(engine.tick(), Ok(TickOutcome::Idle));
        assert!(engine.is_over());
        assert_eq!(engine.board(), &board_before);
    }

    #[test]
    fn test_new_game_resets_mid_game() {
        let mut engine = started(4);
        engine.set_direction(Direction::Up);
        engine.relocate_apple(Position::new(0, 0)).unwrap();
        engine.tick().unwrap();
        engine.set_direction(Direction::Left);
        engine.tick().unwrap();
        engine.set_direction(Direction::Down);
        // Only three segments, so the loop closes on the vacated tail cell.
        assert!(!matches!(engine.tick(), Ok(TickOutcome::Collided { .. })));

        engine.new_game().unwrap();
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.snake().len(), 3);
        assert_eq!(engine.board().count(Content::Snake), 3);
        assert_eq!(engine.board().count(Content::Apple), 1);
    }

    #[test]
    fn test_score_listener_notified() {
        let scores = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&scores);

        let mut engine = SnakeEngine::seeded(GameConfig::default(), 11).unwrap();
        engine.set_score_listener(move |score: u32| sink.lock().unwrap().push(score));
        engine.new_game().unwrap();

        engine.relocate_apple(Position::new(8, 10)).unwrap();
        engine.tick().unwrap();
        engine.relocate_apple(Position::new(10, 10)).unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();

        assert_eq!(*scores.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_invalid_bodies() {
        let rng = || StdRng::seed_from_u64(0);
        let config = GameConfig::default();

        let empty = SnakeEngine::with_snake(config.clone(), Vec::new(), Direction::Up, rng());
        assert!(matches!(empty, Err(GameError::InvalidSnake(_))));

        let off_board = SnakeEngine::with_snake(
            config.clone(),
            [Position::new(20, 0)],
            Direction::Up,
            rng(),
        );
        assert!(matches!(off_board, Err(GameError::InvalidSnake(_))));

        let duplicate = SnakeEngine::with_snake(
            config,
            [Position::new(1, 1), Position::new(1, 2), Position::new(1, 1)],
            Direction::Up,
            rng(),
        );
        assert!(matches!(duplicate, Err(GameError::InvalidSnake(_))));
    }

    #[test]
    fn test_oversized_map_rejected_before_allocating() {
        assert!(matches!(
            SnakeEngine::seeded(GameConfig::new(100_000), 0),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_full_board_on_new_game() {
        let config = GameConfig {
            map_size: 1,
            start_x: 0,
            start_y: 0,
            initial_length: 1,
        };
        let mut engine = SnakeEngine::seeded(config, 0).unwrap();
        assert_eq!(engine.new_game(), Err(GameError::BoardFull));
    }

    #[test]
    fn test_eating_last_free_cell_ends_game() {
        let config = GameConfig {
            map_size: 2,
            start_x: 0,
            start_y: 0,
            initial_length: 1,
        };
        let mut engine = SnakeEngine::with_snake(
            config,
            [Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)],
            Direction::Right,
            StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(engine.board().apple(), Some(Position::new(1, 0)));

        assert_eq!(engine.tick(), Err(GameError::BoardFull));
        assert!(engine.is_over());
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.tick(), Ok(TickOutcome::Idle));
    }

    #[test]
    fn test_relocate_apple_rejects_snake_cell() {
        let mut engine = started(1);
        assert_eq!(
            engine.relocate_apple(Position::new(6, 10)),
            Err(GameError::CellOccupied { x: 6, y: 10 })
        );
        assert_eq!(engine.board().count(Content::Apple), 1);
    }
}
