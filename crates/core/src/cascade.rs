//! Cascade resolution - remove, compact, refill, repeat
//!
//! One [`ResolutionStep`] is produced per iteration. The first iteration only
//! looks at matches through the trigger cells (the two swapped cells); every
//! later iteration scans the whole board, since falling and spawned tiles can
//! line up anywhere. Spawned tiles are not checked against matches: chains
//! are part of the game.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Match3Error, Result};
use crate::generator::random_tile;
use crate::grid::Grid;
use crate::matcher::{all_matches, matches_from, MatchSet};
use crate::rng::TileRng;
use crate::scoring::ChainTally;
use crate::types::{Pos, TileType, MAX_CASCADE_STEPS, TILE_TYPE_COUNT};

/// A tile dropping within its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fall {
    pub col: usize,
    pub from_row: usize,
    pub to_row: usize,
    pub tile: TileType,
}

/// A new tile placed into an emptied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Spawn {
    pub pos: Pos,
    pub tile: TileType,
}

/// One iteration of the cascade, in the order the presentation should play it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionStep {
    /// 1-based position in the chain
    pub chain: u32,
    pub removed: MatchSet,
    pub score_delta: u32,
    /// Gravity moves, bottom-up within each column, columns left to right
    pub falls: Vec<Fall>,
    /// Refills, top-down within each column, columns left to right
    pub spawns: Vec<Spawn>,
    /// Board after refill
    pub grid: Grid,
}

impl ResolutionStep {
    /// Replay this step's diff onto `grid`.
    ///
    /// Starting from the board the step was computed on, the result equals
    /// [`ResolutionStep::grid`].
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        for pos in self.removed.iter() {
            grid.set(pos, None)?;
        }
        for fall in &self.falls {
            grid.set(Pos::new(fall.from_row, fall.col), None)?;
            grid.set(Pos::new(fall.to_row, fall.col), Some(fall.tile))?;
        }
        for spawn in &self.spawns {
            grid.set(spawn.pos, Some(spawn.tile))?;
        }
        Ok(())
    }
}

/// Compact every column toward the bottom, keeping tile order
pub fn apply_gravity(grid: &mut Grid) -> Vec<Fall> {
    let (rows, cols) = grid.dimensions();
    let mut falls = Vec::new();

    for col in 0..cols {
        // Two-pointer pass from the bottom: `write` is the next free slot.
        let mut write = rows;
        for read in (0..rows).rev() {
            let from = Pos::new(read, col);
            if let Some(tile) = grid[from] {
                write -= 1;
                if write != read {
                    grid[Pos::new(write, col)] = Some(tile);
                    grid[from] = None;
                    falls.push(Fall {
                        col,
                        from_row: read,
                        to_row: write,
                        tile,
                    });
                }
            }
        }
    }

    falls
}

/// Fill every empty cell with a random tile
pub fn refill<R: TileRng>(grid: &mut Grid, rng: &mut R, tile_types: u8) -> Vec<Spawn> {
    let (rows, cols) = grid.dimensions();
    let mut spawns = Vec::new();

    for col in 0..cols {
        for row in 0..rows {
            let pos = Pos::new(row, col);
            if grid[pos].is_none() {
                let tile = random_tile(rng, tile_types);
                grid[pos] = Some(tile);
                spawns.push(Spawn { pos, tile });
            }
        }
    }

    spawns
}

/// Cascade resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub tile_types: u8,
    pub max_steps: u32,
}

impl Default for Cascade {
    fn default() -> Self {
        Self {
            tile_types: TILE_TYPE_COUNT,
            max_steps: MAX_CASCADE_STEPS,
        }
    }
}

impl Cascade {
    pub fn new(tile_types: u8, max_steps: u32) -> Self {
        Self {
            tile_types,
            max_steps,
        }
    }

    /// Run the cascade to completion.
    ///
    /// `triggers` seeds the first iteration; an empty slice resolves the
    /// whole board from the start. Returns no steps when nothing matches.
    /// On `CascadeLimit` the grid is left mid-cascade; callers restore it.
    pub fn resolve<R: TileRng>(
        &self,
        grid: &mut Grid,
        triggers: &[Pos],
        rng: &mut R,
    ) -> Result<Vec<ResolutionStep>> {
        let mut steps = Vec::new();
        let mut tally = ChainTally::default();
        let mut matched = if triggers.is_empty() {
            all_matches(grid)
        } else {
            matches_from(grid, triggers)?
        };

        while !matched.is_empty() {
            if tally.steps >= self.max_steps {
                warn!(steps = tally.steps, "cascade exceeded step limit");
                return Err(Match3Error::CascadeLimit {
                    steps: self.max_steps,
                });
            }

            for pos in matched.iter() {
                grid[pos] = None;
            }
            let falls = apply_gravity(grid);
            let spawns = refill(grid, rng, self.tile_types);
            let score_delta = tally.record(matched.len());

            debug!(
                chain = tally.steps,
                removed = matched.len(),
                falls = falls.len(),
                score_delta,
                "cascade step"
            );

            steps.push(ResolutionStep {
                chain: tally.steps,
                removed: matched,
                score_delta,
                falls,
                spawns,
                grid: grid.clone(),
            });
            matched = all_matches(grid);
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;
    use crate::types::TileType::*;

    fn grid(text: &str) -> Grid {
        Grid::parse(text).unwrap()
    }

    #[test]
    fn test_gravity_compacts_and_preserves_order() {
        let mut g = grid("R.\n.B\nG.\n..");
        let falls = apply_gravity(&mut g);
        assert_eq!(g, grid("..\n..\nR.\nGB"));
        assert_eq!(
            falls,
            vec![
                Fall { col: 0, from_row: 2, to_row: 3, tile: Green },
                Fall { col: 0, from_row: 0, to_row: 2, tile: Red },
                Fall { col: 1, from_row: 1, to_row: 3, tile: Blue },
            ]
        );
    }

    #[test]
    fn test_gravity_noop_on_full_grid() {
        let mut g = grid("RG\nBY");
        assert!(apply_gravity(&mut g).is_empty());
        assert_eq!(g, grid("RG\nBY"));
    }

    #[test]
    fn test_refill_order_is_column_major_top_down() {
        let mut g = grid("..\n.R\nGR");
        let mut rng = SequenceRng::from_tiles(&[Blue, Yellow, Purple]);
        let spawns = refill(&mut g, &mut rng, 6);
        assert_eq!(
            spawns,
            vec![
                Spawn { pos: Pos::new(0, 0), tile: Blue },
                Spawn { pos: Pos::new(1, 0), tile: Yellow },
                Spawn { pos: Pos::new(0, 1), tile: Purple },
            ]
        );
        assert!(g.is_full());
    }

    #[test]
    fn test_single_step_clears_three() {
        // Row after swap: R R R G
        let mut g = grid("RRRG");
        let mut rng = SequenceRng::from_tiles(&[Blue, Yellow, Blue]);
        let steps = Cascade::default()
            .resolve(&mut g, &[Pos::new(0, 2), Pos::new(0, 3)], &mut rng)
            .unwrap();

        assert_eq!(steps.len(), 1);
        let step = &steps[0];
        assert_eq!(step.chain, 1);
        assert_eq!(step.removed.len(), 3);
        assert_eq!(step.score_delta, 30);
        assert!(step.falls.is_empty());
        assert_eq!(step.spawns.len(), 3);
        assert_eq!(g, grid("BYBG"));
        assert_eq!(step.grid, g);
    }

    #[test]
    fn test_chain_reaction_produces_second_step() {
        // Removing the red row lets the column-0 B drop onto two B's.
        //   B G Y      . G Y      . . .
        //   R R R  ->  B G Y  ->  spawn row 0
        //   B Y G      B Y G
        //   B G Y      B G Y
        let mut g = grid("BGY\nRRR\nBYG\nBGY");
        // Step 1 spawns row 0 (cols 0..2); step 2 refills column 0.
        let mut rng = SequenceRng::from_tiles(&[Yellow, Purple, Green, Green, Purple, Yellow]);
        let steps = Cascade::default()
            .resolve(&mut g, &[Pos::new(1, 1)], &mut rng)
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].removed.len(), 3);
        assert_eq!(steps[1].chain, 2);
        assert_eq!(
            steps[1].removed.to_vec(),
            vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)]
        );
        assert_eq!(steps.iter().map(|s| s.score_delta).sum::<u32>(), 60);
        assert!(all_matches(&g).is_empty());
    }

    #[test]
    fn test_steps_replay_onto_start_grid() {
        let start = grid("BGY\nRRR\nBYG\nBGY");
        let mut g = start.clone();
        let mut rng = SequenceRng::from_tiles(&[Yellow, Purple, Green, Green, Purple, Yellow]);
        let steps = Cascade::default()
            .resolve(&mut g, &[Pos::new(1, 1)], &mut rng)
            .unwrap();

        let mut replay = start;
        for step in &steps {
            step.apply(&mut replay).unwrap();
            assert_eq!(replay, step.grid);
        }
        assert_eq!(replay, g);
    }

    #[test]
    fn test_no_trigger_match_means_no_steps() {
        let mut g = grid("RGB\nGBR");
        let mut rng = SequenceRng::new(vec![0]);
        let steps = Cascade::default()
            .resolve(&mut g, &[Pos::new(0, 0)], &mut rng)
            .unwrap();
        assert!(steps.is_empty());
        assert_eq!(g, grid("RGB\nGBR"));
    }

    #[test]
    fn test_runaway_cascade_hits_limit() {
        // Refilling with red forever keeps the bottom row matching.
        let mut g = grid("RRR");
        let mut rng = SequenceRng::new(vec![0]);
        let err = Cascade::new(6, 10)
            .resolve(&mut g, &[], &mut rng)
            .unwrap_err();
        assert_eq!(err, Match3Error::CascadeLimit { steps: 10 });
    }
}
