//! Headless autoplay.
//!
//! Plays the best available move repeatedly through the engine bridge and
//! collects a summary. Used by the `match3` binary and by integration tests.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::{Session, SessionConfig};
use crate::engine::{AudioSink, Bridge, Cue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub session: SessionConfig,
    /// Upper bound on swaps to play
    pub moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub seed: u32,
    pub rows: usize,
    pub cols: usize,
    pub tile_types: u8,
    pub moves_played: u32,
    pub score: u32,
    /// Resolution steps across all moves
    pub steps: usize,
    pub longest_chain: u32,
    pub reshuffles: u32,
    /// True when play stopped before `moves` because no move was left
    pub stuck: bool,
    pub board: Vec<String>,
}

/// Audio sink that logs cues instead of playing them
#[derive(Debug, Default)]
pub struct TracingAudio {
    pub played: u32,
}

impl AudioSink for TracingAudio {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        debug!(?cue, "cue");
    }
}

pub fn run(config: &SimConfig) -> Result<SimReport> {
    let session = Session::new(config.session.clone()).context("failed to start session")?;
    let mut bridge = Bridge::new(session, TracingAudio::default());

    let mut steps = 0;
    let mut longest_chain = 0;
    let mut reshuffles = 0;
    let mut stuck = false;

    for turn in 0..config.moves {
        let Some(mv) = bridge.hint() else {
            info!(turn, "no legal move left");
            stuck = true;
            break;
        };
        let outcome = bridge
            .swap_cells(mv.from, mv.to)
            .with_context(|| format!("swap {} failed", mv))?;
        if !outcome.accepted {
            bail!("hinted move {} was rejected: {:?}", mv, outcome.rejection);
        }
        if outcome.reshuffled.is_some() {
            reshuffles += 1;
        }
        for step in bridge.drain() {
            steps += 1;
            longest_chain = longest_chain.max(step.chain);
        }
    }

    let (session, audio) = bridge.into_parts();
    let grid = session.grid();
    info!(
        moves = session.move_count(),
        score = session.score(),
        cues = audio.played,
        "autoplay finished"
    );

    Ok(SimReport {
        seed: config.session.seed,
        rows: grid.rows(),
        cols: grid.cols(),
        tile_types: config.session.tile_types,
        moves_played: session.move_count(),
        score: session.score(),
        steps,
        longest_chain,
        reshuffles,
        stuck,
        board: grid.to_string().lines().map(str::to_owned).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autoplay_scores_every_move() {
        let config = SimConfig {
            session: SessionConfig::new(8, 8, 6, 2024),
            moves: 20,
        };
        let report = run(&config).unwrap();
        assert_eq!(report.moves_played, 20);
        assert!(!report.stuck);
        assert!(report.score >= 20 * 30);
        assert!(report.steps >= 20);
        assert_eq!(report.board.len(), 8);
    }

    #[test]
    fn test_autoplay_is_deterministic() {
        let config = SimConfig {
            session: SessionConfig::new(6, 7, 5, 99),
            moves: 10,
        };
        assert_eq!(run(&config).unwrap(), run(&config).unwrap());
    }

    #[test]
    fn test_bad_config_is_reported() {
        let config = SimConfig {
            session: SessionConfig::new(8, 8, 9, 1),
            moves: 1,
        };
        let err = run(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("tile type count"));
    }
}
