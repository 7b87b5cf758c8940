use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::food::generate_food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// What survives of a game once its state has been discarded.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverSummary {
    pub score: u32,
    pub high_score: u32,
    pub reason: EndReason,
    /// Set when the final tick raised the high score and it must be persisted.
    pub new_high_score: Option<u32>,
}

/// Result of one call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is paused; nothing changed.
    Paused,
    Moved,
    /// Food was eaten. `new_high_score` carries a value to persist when the
    /// score just went past the previous best.
    Ate { new_high_score: Option<u32> },
    /// The game is over and the state must not be ticked again.
    GameOver(GameOverSummary),
}

/// Complete mutable game state for one play-through.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub paused: bool,
    pub tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from system entropy.
    #[must_use]
    pub fn new(bounds: GridSize, high_score: u32) -> Self {
        Self::with_rng(bounds, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, high_score: u32, seed: u64) -> Self {
        Self::with_rng(bounds, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, high_score: u32, mut rng: StdRng) -> Self {
        let middle = i32::from(bounds.side() / 2);
        let snake = Snake::new(
            Position::new(middle, middle),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );
        // Every accepted grid has free cells left around a fresh snake.
        let food = generate_food(&mut rng, bounds, &snake).unwrap_or(Position::new(0, 0));

        Self {
            snake,
            food,
            score: 0,
            high_score,
            paused: false,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Returns the grid this game is played on.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }

        self.tick_count += 1;
        let head = self.snake.advance();

        let mut ate = false;
        let mut board_filled = false;
        let mut new_high_score = None;
        if head == self.food {
            ate = true;
            match generate_food(&mut self.rng, self.bounds, &self.snake) {
                Some(food) => self.food = food,
                None => board_filled = true,
            }

            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
                new_high_score = Some(self.score);
            }
        } else {
            self.snake.drop_tail();
        }

        let reason = if !head.is_within_bounds(self.bounds) {
            Some(EndReason::WallCollision)
        } else if self.snake.head_overlaps_body() {
            Some(EndReason::SelfCollision)
        } else if board_filled {
            Some(EndReason::BoardFilled)
        } else {
            None
        };

        if let Some(reason) = reason {
            return TickOutcome::GameOver(GameOverSummary {
                score: self.score,
                high_score: self.high_score,
                reason,
                new_high_score,
            });
        }

        if ate {
            TickOutcome::Ate { new_high_score }
        } else {
            TickOutcome::Moved
        }
    }

    /// Requests a turn for the next tick; reversals of the committed
    /// direction are ignored. Returns whether the request was applied.
    pub fn set_pending_direction(&mut self, requested: Direction) -> bool {
        self.snake.set_pending_direction(requested)
    }

    /// Flips the pause flag.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Returns the direction applied on the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Returns the direction the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }
}
