//! Scoring module - flat per-tile scoring
//!
//! Every removed tile is worth [`SCORE_PER_TILE`] points regardless of run
//! shape or chain depth; a chain pays out once per step it removes tiles.

use crate::types::SCORE_PER_TILE;

/// Points for removing `cells` tiles in one step
pub fn step_score(cells: usize) -> u32 {
    (cells as u32).saturating_mul(SCORE_PER_TILE)
}

/// Running totals over one swap's cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainTally {
    /// Steps resolved so far
    pub steps: u32,
    /// Tiles removed across all steps
    pub removed: u32,
    pub score: u32,
}

impl ChainTally {
    pub fn record(&mut self, removed: usize) -> u32 {
        let delta = step_score(removed);
        self.steps += 1;
        self.removed = self.removed.saturating_add(removed as u32);
        self.score = self.score.saturating_add(delta);
        delta
    }
}
