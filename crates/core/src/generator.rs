//! Board generation - random match-free boards and deadlock reshuffles

use tracing::{debug, error, info};

use crate::error::{Match3Error, Result};
use crate::grid::Grid;
use crate::matcher::{all_matches, has_matches};
use crate::moves::is_deadlocked;
use crate::rng::TileRng;
use crate::types::{TileType, MIN_TILE_TYPES, TILE_TYPE_COUNT};

/// Reject tile type counts the generator cannot work with
pub fn validate_tile_types(tile_types: u8) -> Result<()> {
    if !(MIN_TILE_TYPES..=TILE_TYPE_COUNT).contains(&tile_types) {
        return Err(Match3Error::InvalidConfig(format!(
            "tile type count must be in {}..={}, got {}",
            MIN_TILE_TYPES, TILE_TYPE_COUNT, tile_types
        )));
    }
    Ok(())
}

/// Single uniformly random tile, no match avoidance
pub fn random_tile<R: TileRng>(rng: &mut R, tile_types: u8) -> TileType {
    rng.next_tile(tile_types)
}

/// Fill every cell at random, then re-roll matched cells until none remain.
///
/// Gives up with `GenerationFailed` after `max_passes` re-roll passes.
pub fn generate<R: TileRng>(
    rows: usize,
    cols: usize,
    tile_types: u8,
    rng: &mut R,
    max_passes: u32,
) -> Result<Grid> {
    validate_tile_types(tile_types)?;
    let mut grid = Grid::new(rows, cols)?;
    for cell in grid.cells_mut() {
        *cell = Some(random_tile(rng, tile_types));
    }

    for pass in 0..max_passes {
        let matched = all_matches(&grid);
        if matched.is_empty() {
            debug!(rows, cols, passes = pass, "generated match-free board");
            return Ok(grid);
        }
        for pos in matched.iter() {
            grid[pos] = Some(random_tile(rng, tile_types));
        }
    }

    if !has_matches(&grid) {
        return Ok(grid);
    }
    error!(
        rows,
        cols,
        tile_types,
        passes = max_passes,
        "board generation did not converge"
    );
    Err(Match3Error::GenerationFailed { passes: max_passes })
}

/// Generate a match-free board that also has at least one legal move
pub fn generate_playable<R: TileRng>(
    rows: usize,
    cols: usize,
    tile_types: u8,
    rng: &mut R,
    max_passes: u32,
    attempts: u32,
) -> Result<Grid> {
    for _ in 0..attempts.max(1) {
        let grid = generate(rows, cols, tile_types, rng, max_passes)?;
        if !is_deadlocked(&grid) {
            return Ok(grid);
        }
    }
    Err(Match3Error::ReshuffleFailed { attempts })
}

/// Rearrange a deadlocked board into a match-free one with a legal move.
///
/// Permutes the board's own tiles first; when no permutation within
/// `attempts` works, falls back to a freshly generated board.
pub fn reshuffle<R: TileRng>(
    grid: &Grid,
    rng: &mut R,
    tile_types: u8,
    attempts: u32,
    max_passes: u32,
) -> Result<Grid> {
    let (rows, cols) = grid.dimensions();
    let mut tiles: Vec<TileType> = grid.cells().iter().flatten().copied().collect();

    if tiles.len() == rows * cols {
        for attempt in 0..attempts {
            rng.shuffle(&mut tiles);
            let mut candidate = grid.clone();
            for (cell, tile) in candidate.cells_mut().iter_mut().zip(&tiles) {
                *cell = Some(*tile);
            }
            if !has_matches(&candidate) && !is_deadlocked(&candidate) {
                info!(attempt, "reshuffled deadlocked board");
                return Ok(candidate);
            }
        }
    }

    info!("permutations exhausted, regenerating board");
    generate_playable(rows, cols, tile_types, rng, max_passes, attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::legal_moves;
    use crate::rng::{SequenceRng, SimpleRng};
    use crate::types::{MAX_GENERATION_PASSES, MAX_RESHUFFLE_ATTEMPTS};

    #[test]
    fn test_generated_board_is_full_and_match_free() {
        for seed in 1..50 {
            let mut rng = SimpleRng::new(seed);
            let grid = generate(8, 8, 6, &mut rng, MAX_GENERATION_PASSES).unwrap();
            assert!(grid.is_full());
            assert!(all_matches(&grid).is_empty(), "seed {} left matches:\n{}", seed, grid);
        }
    }

    #[test]
    fn test_generation_respects_type_count() {
        let mut rng = SimpleRng::new(5);
        let grid = generate(6, 9, 3, &mut rng, MAX_GENERATION_PASSES).unwrap();
        assert_eq!(grid.dimensions(), (6, 9));
        assert!(grid.cells().iter().flatten().all(|t| t.index() < 3));
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = generate(8, 8, 6, &mut SimpleRng::new(42), MAX_GENERATION_PASSES).unwrap();
        let b = generate(8, 8, 6, &mut SimpleRng::new(42), MAX_GENERATION_PASSES).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_type_counts() {
        let mut rng = SimpleRng::new(1);
        assert!(matches!(
            generate(4, 4, 2, &mut rng, 10),
            Err(Match3Error::InvalidConfig(_))
        ));
        assert!(matches!(
            generate(4, 4, 7, &mut rng, 10),
            Err(Match3Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stuck_rng_fails_loudly() {
        // Always red: every re-roll recreates the same runs.
        let mut rng = SequenceRng::new(vec![0]);
        assert_eq!(
            generate(4, 4, 6, &mut rng, 25),
            Err(Match3Error::GenerationFailed { passes: 25 })
        );
    }

    #[test]
    fn test_reshuffle_unlocks_deadlock() {
        // Latin-square rows repeated: no swap matches.
        let grid = Grid::parse("RGBY\nGBYR\nBYRG\nYRGB").unwrap();
        assert!(legal_moves(&grid).is_empty());

        let mut rng = SimpleRng::new(11);
        let shuffled = reshuffle(&grid, &mut rng, 4, MAX_RESHUFFLE_ATTEMPTS, MAX_GENERATION_PASSES)
            .unwrap();
        assert!(!has_matches(&shuffled));
        assert!(!legal_moves(&shuffled).is_empty());
        assert_eq!(shuffled.dimensions(), grid.dimensions());
    }

    #[test]
    fn test_reshuffle_keeps_tile_multiset_when_permuting() {
        let grid = Grid::parse("RGBY\nGBYR\nBYRG\nYRGB").unwrap();
        let mut rng = SimpleRng::new(3);
        let shuffled = reshuffle(&grid, &mut rng, 4, MAX_RESHUFFLE_ATTEMPTS, MAX_GENERATION_PASSES)
            .unwrap();
        for tile in [TileType::Red, TileType::Green, TileType::Blue, TileType::Yellow] {
            assert_eq!(shuffled.count(tile), 4);
        }
    }
}
