//! Game session - owns the board and drives swaps through the resolver
//!
//! The session is a small state machine:
//!
//! ```text
//!   Idle --attempt_swap--> ResolvingSwap --match--> Cascading --all steps acked--> Idle
//!                               |
//!                               +--no match (swap reverted)--> Idle
//! ```
//!
//! Resolution itself is synchronous: `attempt_swap` returns every
//! [`ResolutionStep`] at once and the board already holds the final state.
//! `Cascading` is the animation lock. It lasts until the presentation layer
//! has acknowledged each step with [`Session::tick_animation_complete`] (or
//! skipped the rest with [`Session::finish_playback`]); swaps arriving in the
//! meantime are rejected, not queued.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cascade::{Cascade, ResolutionStep};
use crate::error::{Match3Error, Result};
use crate::generator::{generate, generate_playable, reshuffle, validate_tile_types};
use crate::grid::Grid;
use crate::matcher::matches_from;
use crate::moves::{best_move, is_deadlocked, legal_moves};
use crate::rng::{SimpleRng, TileRng};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Direction, Move, Pos, DEFAULT_COLS, DEFAULT_ROWS, MAX_CASCADE_STEPS, MAX_GENERATION_PASSES,
    MAX_RESHUFFLE_ATTEMPTS, TILE_TYPE_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    ResolvingSwap,
    Cascading,
}

/// Why a swap was turned down. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The two cells are not orthogonal neighbours
    NotAdjacent,
    /// A previous swap is still being played back
    InvalidState,
    /// The swap would not form a run; the board is unchanged
    NoMatch,
}

/// What to do when no legal move is left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReshufflePolicy {
    /// Leave the board deadlocked; callers check [`Session::is_deadlocked`]
    Never,
    /// Rearrange the board as soon as it deadlocks
    #[default]
    OnDeadlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub tile_types: u8,
    pub seed: u32,
    pub reshuffle: ReshufflePolicy,
    pub max_generation_passes: u32,
    pub max_cascade_steps: u32,
    pub max_reshuffle_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tile_types: TILE_TYPE_COUNT,
            seed: 1,
            reshuffle: ReshufflePolicy::default(),
            max_generation_passes: MAX_GENERATION_PASSES,
            max_cascade_steps: MAX_CASCADE_STEPS,
            max_reshuffle_attempts: MAX_RESHUFFLE_ATTEMPTS,
        }
    }
}

impl SessionConfig {
    pub fn new(rows: usize, cols: usize, tile_types: u8, seed: u32) -> Self {
        Self {
            rows,
            cols,
            tile_types,
            seed,
            ..Self::default()
        }
    }

    pub fn with_reshuffle(mut self, policy: ReshufflePolicy) -> Self {
        self.reshuffle = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Match3Error::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        validate_tile_types(self.tile_types)?;
        if self.max_generation_passes == 0 || self.max_cascade_steps == 0 {
            return Err(Match3Error::InvalidConfig(
                "generation and cascade limits must be non-zero".into(),
            ));
        }
        Ok(())
    }

    fn cascade(&self) -> Cascade {
        Cascade::new(self.tile_types, self.max_cascade_steps)
    }
}

/// Result of one swap attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapOutcome {
    pub accepted: bool,
    pub rejection: Option<Rejection>,
    pub steps: Vec<ResolutionStep>,
    /// Replacement board when the cascade left no legal move
    pub reshuffled: Option<Grid>,
}

impl SwapOutcome {
    fn rejected(reason: Rejection) -> Self {
        Self {
            accepted: false,
            rejection: Some(reason),
            steps: Vec::new(),
            reshuffled: None,
        }
    }

    /// Points earned by this swap
    pub fn score_delta(&self) -> u32 {
        self.steps.iter().map(|s| s.score_delta).sum()
    }
}

/// One game: board, counters and the randomness feeding refills
#[derive(Debug, Clone)]
pub struct Session<R: TileRng = SimpleRng> {
    config: SessionConfig,
    grid: Grid,
    score: u32,
    move_count: u32,
    state: SessionState,
    pending_steps: usize,
    rng: R,
}

/// Start a seeded game with default limits
pub fn new_session(rows: usize, cols: usize, tile_types: u8, seed: u32) -> Result<Session> {
    Session::new(SessionConfig::new(rows, cols, tile_types, seed))
}

impl Session<SimpleRng> {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: TileRng> Session<R> {
    /// Generate a fresh board drawing from `rng`
    pub fn with_rng(config: SessionConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let grid = match config.reshuffle {
            ReshufflePolicy::Never => generate(
                config.rows,
                config.cols,
                config.tile_types,
                &mut rng,
                config.max_generation_passes,
            )?,
            ReshufflePolicy::OnDeadlock => generate_playable(
                config.rows,
                config.cols,
                config.tile_types,
                &mut rng,
                config.max_generation_passes,
                config.max_reshuffle_attempts,
            )?,
        };
        info!(
            rows = config.rows,
            cols = config.cols,
            tile_types = config.tile_types,
            seed = config.seed,
            "session created"
        );
        Ok(Self::assemble(config, grid, rng))
    }

    /// Start from a prepared board, taken as-is.
    ///
    /// The board's dimensions replace `config.rows`/`config.cols`.
    pub fn from_grid(grid: Grid, mut config: SessionConfig, rng: R) -> Result<Self> {
        (config.rows, config.cols) = grid.dimensions();
        config.validate()?;
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SessionConfig, grid: Grid, rng: R) -> Self {
        Self {
            config,
            grid,
            score: 0,
            move_count: 0,
            state: SessionState::Idle,
            pending_steps: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Copy of the current board
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pending_steps(&self) -> usize {
        self.pending_steps
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.grid)
    }

    pub fn is_deadlocked(&self) -> bool {
        is_deadlocked(&self.grid)
    }

    /// Suggested move for a hint display
    pub fn hint(&self) -> Option<Move> {
        best_move(&self.grid)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clone_from(&self.grid);
        out.score = self.score;
        out.move_count = self.move_count;
        out.state = self.state;
        out.pending_steps = self.pending_steps;
        out.legal_moves = self.legal_moves().len();
        out.tile_types = self.config.tile_types;
        out.seed = self.config.seed;
    }

    pub fn game_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            score: self.score,
            move_count: self.move_count,
            state: self.state,
            pending_steps: self.pending_steps,
            legal_moves: self.legal_moves().len(),
            tile_types: self.config.tile_types,
            seed: self.config.seed,
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }

    /// Swap two cells and resolve the resulting cascade.
    ///
    /// Off-board positions are a caller bug and return `OutOfBounds`. Every
    /// gameplay refusal comes back as `accepted: false` with a [`Rejection`].
    pub fn attempt_swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome> {
        self.grid.check(a)?;
        self.grid.check(b)?;
        if self.state != SessionState::Idle {
            debug!(state = ?self.state, "swap rejected while busy");
            return Ok(SwapOutcome::rejected(Rejection::InvalidState));
        }
        let Some(mv) = Move::new(a, b) else {
            debug!(%a, %b, "swap rejected, cells not adjacent");
            return Ok(SwapOutcome::rejected(Rejection::NotAdjacent));
        };
        self.play(mv)
    }

    /// Swap `pos` with its neighbour in `dir`, as a swipe gesture would
    pub fn swap_toward(&mut self, pos: Pos, dir: Direction) -> Result<SwapOutcome> {
        self.grid.check(pos)?;
        match self.grid.neighbor(pos, dir) {
            Some(to) => self.attempt_swap(pos, to),
            None => Ok(SwapOutcome::rejected(Rejection::NotAdjacent)),
        }
    }

    fn play(&mut self, mv: Move) -> Result<SwapOutcome> {
        self.transition(SessionState::ResolvingSwap);
        let before = self.grid.clone();
        self.grid.swap(mv.from, mv.to)?;

        let triggered = matches_from(&self.grid, &[mv.from, mv.to])?;
        if triggered.is_empty() {
            self.grid = before;
            self.transition(SessionState::Idle);
            debug!(%mv, "swap rejected, no match");
            return Ok(SwapOutcome::rejected(Rejection::NoMatch));
        }

        self.move_count += 1;
        self.transition(SessionState::Cascading);

        let cascade = self.config.cascade();
        let steps = match cascade.resolve(&mut self.grid, &[mv.from, mv.to], &mut self.rng) {
            Ok(steps) => steps,
            Err(err) => {
                self.grid = before;
                self.move_count -= 1;
                self.transition(SessionState::Idle);
                return Err(err);
            }
        };

        let delta: u32 = steps.iter().map(|s| s.score_delta).sum();
        self.score = self.score.saturating_add(delta);
        self.pending_steps = steps.len();
        info!(
            %mv,
            steps = steps.len(),
            score_delta = delta,
            score = self.score,
            "swap resolved"
        );

        let reshuffled = self.recover_from_deadlock();
        Ok(SwapOutcome {
            accepted: true,
            rejection: None,
            steps,
            reshuffled,
        })
    }

    fn recover_from_deadlock(&mut self) -> Option<Grid> {
        if self.config.reshuffle == ReshufflePolicy::Never || !is_deadlocked(&self.grid) {
            return None;
        }
        match reshuffle(
            &self.grid,
            &mut self.rng,
            self.config.tile_types,
            self.config.max_reshuffle_attempts,
            self.config.max_generation_passes,
        ) {
            Ok(grid) => {
                info!("board deadlocked, reshuffled");
                self.grid = grid.clone();
                Some(grid)
            }
            Err(err) => {
                warn!(%err, "board deadlocked and could not be reshuffled");
                None
            }
        }
    }

    /// Acknowledge that one resolution step finished playing.
    ///
    /// Releases the animation lock after the last pending step.
    pub fn tick_animation_complete(&mut self) -> SessionState {
        if self.state == SessionState::Cascading {
            self.pending_steps = self.pending_steps.saturating_sub(1);
            if self.pending_steps == 0 {
                self.transition(SessionState::Idle);
            }
        }
        self.state
    }

    /// Drop any remaining playback and return to `Idle`
    pub fn finish_playback(&mut self) {
        self.pending_steps = 0;
        self.transition(SessionState::Idle);
    }
}
