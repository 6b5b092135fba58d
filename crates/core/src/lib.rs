//! Match-3 resolution core - pure, deterministic, and testable
//!
//! This crate holds every game rule and no presentation: no rendering, no
//! timers, no audio. A presentation layer feeds swap intents in and plays the
//! returned [`ResolutionStep`]s back at its own pace.
//!
//! # Module Structure
//!
//! - [`grid`]: rectangular board of optional tiles, row-major
//! - [`matcher`]: horizontal/vertical run detection
//! - [`generator`]: match-free board generation and deadlock reshuffles
//! - [`moves`]: swap validation and legal move enumeration
//! - [`cascade`]: remove, gravity, refill, repeat
//! - [`session`]: state machine around one board
//! - [`rng`]: injectable randomness
//! - [`scoring`]: flat per-tile scoring
//!
//! # Game Rules
//!
//! - **Runs**: three or more equal tiles in a row or column; crossing runs
//!   are removed together
//! - **Swaps**: only orthogonal neighbours, and only when the swap forms a run
//! - **Gravity**: tiles fall straight down, keeping their order
//! - **Refill**: empty cells take random tiles, which may chain into new runs
//! - **Scoring**: 10 points per removed tile
//!
//! # Example
//!
//! ```
//! use match3_core::{new_session, SessionState};
//!
//! let mut session = new_session(8, 8, 6, 12345).unwrap();
//! let mv = session.hint().expect("fresh boards always have a move");
//!
//! let outcome = session.attempt_swap(mv.from, mv.to).unwrap();
//! assert!(outcome.accepted);
//! assert!(session.score() >= 30);
//!
//! // Presentation acknowledges each step, then the board unlocks.
//! while session.state() == SessionState::Cascading {
//!     session.tick_animation_complete();
//! }
//! ```

pub mod cascade;
pub mod error;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{apply_gravity, refill, Cascade, Fall, ResolutionStep, Spawn};
pub use error::{Match3Error, Result};
pub use generator::{generate, generate_playable, random_tile, reshuffle};
pub use grid::Grid;
pub use matcher::{all_matches, matches_at, matches_from, MatchSet};
pub use moves::{best_move, is_deadlocked, legal_moves, swap_preview, would_match};
pub use rng::{SequenceRng, SimpleRng, TileRng};
pub use scoring::{step_score, ChainTally};
pub use session::{
    new_session, Rejection, ReshufflePolicy, Session, SessionConfig, SessionState, SwapOutcome,
};
pub use snapshot::GameSnapshot;
