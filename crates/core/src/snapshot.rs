use serde::Serialize;

use crate::grid::Grid;
use crate::session::SessionState;

/// Serialisable view of a session for frontends and tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub move_count: u32,
    pub state: SessionState,
    /// Steps the presentation has yet to acknowledge
    pub pending_steps: usize,
    pub legal_moves: usize,
    pub tile_types: u8,
    pub seed: u32,
}

impl GameSnapshot {
    /// True when the session would accept a swap right now
    pub fn playable(&self) -> bool {
        self.state == SessionState::Idle && self.legal_moves > 0
    }
}
