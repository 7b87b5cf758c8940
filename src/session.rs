use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::GridSize;
use crate::game::{EndReason, GameOverSummary, GameState, TickOutcome};
use crate::input::{Control, Direction};
use crate::scheduler::Ticker;
use crate::score::ScoreKeeper;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Before the first game has started.
    Idle,
    Running,
    Paused,
    /// The last game ended; waiting for a restart.
    GameOver,
}

/// Whether the host loop should keep going after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Single owner of everything that changes while playing.
///
/// Inputs and ticks are plain method calls taking the current instant, so
/// the whole lifecycle can be driven headlessly.
pub struct Session {
    bounds: GridSize,
    seed: Option<u64>,
    game: Option<GameState>,
    last_result: Option<GameOverSummary>,
    ticker: Ticker,
    scores: ScoreKeeper,
    message: Option<String>,
    games_started: u64,
    high_score_at_start: u32,
}

impl Session {
    /// Creates an idle session. The stored high score is read again on every start.
    #[must_use]
    pub fn new(bounds: GridSize, tick_interval: Duration, scores: ScoreKeeper) -> Self {
        Self {
            bounds,
            seed: None,
            game: None,
            last_result: None,
            ticker: Ticker::new(tick_interval),
            scores,
            message: None,
            games_started: 0,
            high_score_at_start: 0,
        }
    }

    /// Makes every game of this session reproducible from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.game, &self.last_result) {
            (Some(game), _) if game.paused => Phase::Paused,
            (Some(_), _) => Phase::Running,
            (None, Some(_)) => Phase::GameOver,
            (None, None) => Phase::Idle,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// The live game, absent before the first start and after game over.
    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<GameOverSummary> {
        self.last_result
    }

    /// Text for the message slot, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match (&self.game, &self.last_result) {
            (Some(game), _) => game.score,
            (None, Some(result)) => result.score,
            (None, None) => 0,
        }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.game
            .as_ref()
            .map_or(self.scores.best(), |game| game.high_score.max(self.scores.best()))
    }

    /// Best score as it stood when the current or last game began.
    #[must_use]
    pub fn high_score_at_start(&self) -> u32 {
        self.high_score_at_start
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreKeeper {
        &self.scores
    }

    /// Time until the next scheduled tick, `None` when nothing is scheduled.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    /// Discards any game in progress and starts a new one.
    pub fn start(&mut self, now: Instant) {
        let high_score = self.scores.reload();
        let game = match self.seed {
            Some(seed) => GameState::new_with_seed(
                self.bounds,
                high_score,
                seed.wrapping_add(self.games_started),
            ),
            None => GameState::new(self.bounds, high_score),
        };

        self.games_started += 1;
        self.high_score_at_start = high_score;
        self.game = Some(game);
        self.last_result = None;
        self.message = None;
        self.ticker.start(now);

        info!(
            game = self.games_started,
            grid = self.bounds.side(),
            high_score,
            "game started"
        );
    }

    /// Applies one input control.
    pub fn handle(&mut self, control: Control, now: Instant) -> Flow {
        match control {
            Control::Quit => return Flow::Quit,
            Control::Turn(direction) => {
                self.turn(direction);
            }
            Control::Pause => self.toggle_pause(now),
            Control::PauseOrRestart => match self.phase() {
                Phase::Idle | Phase::GameOver => self.start(now),
                Phase::Running | Phase::Paused => self.toggle_pause(now),
            },
        }

        Flow::Continue
    }

    /// Requests a turn; only a running game accepts movement input.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.phase() != Phase::Running {
            return false;
        }

        self.game
            .as_mut()
            .is_some_and(|game| game.set_pending_direction(direction))
    }

    /// Pauses a running game or resumes a paused one.
    ///
    /// Pausing stops the schedule; resuming restarts it with a full period.
    pub fn toggle_pause(&mut self, now: Instant) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        game.toggle_pause();
        if game.paused {
            self.ticker.cancel();
            debug!(score = game.score, "paused");
        } else {
            self.ticker.start(now);
            debug!(score = game.score, "resumed");
        }
    }

    /// Ticks the game when the schedule says so.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.poll(now) {
            return None;
        }

        let outcome = self.game.as_mut()?.tick();
        match outcome {
            TickOutcome::Ate {
                new_high_score: Some(score),
            } => {
                info!(score, "new high score");
                self.scores.record(score);
            }
            TickOutcome::GameOver(summary) => self.finish(summary),
            TickOutcome::Paused | TickOutcome::Moved | TickOutcome::Ate { .. } => {}
        }

        Some(outcome)
    }

    fn finish(&mut self, summary: GameOverSummary) {
        if let Some(score) = summary.new_high_score {
            self.scores.record(score);
        }

        self.ticker.cancel();
        self.game = None;
        self.last_result = Some(summary);
        self.message = Some(game_over_message(summary));

        info!(
            score = summary.score,
            high_score = summary.high_score,
            reason = ?summary.reason,
            "game over"
        );
    }
}

/// Message-slot text shown when a game ends.
#[must_use]
pub fn game_over_message(summary: GameOverSummary) -> String {
    let headline = match summary.reason {
        EndReason::BoardFilled => "Board filled!",
        EndReason::WallCollision | EndReason::SelfCollision => "Game Over!",
    };

    format!(
        "{headline} Your score is {}. Press space to play again.",
        summary.score
    )
}
